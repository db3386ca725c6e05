//! End-to-end command-stream scenarios compared against their exact
//! transcripts.

use rwsim::run_script;

fn run(script: &str) -> Vec<String> {
    run_script(script.as_bytes())
        .expect("in-memory reader cannot fail")
        .lines()
        .to_vec()
}

#[test]
fn test_basic_placement() {
    let script = "\
Initialize(2)
SubmitFlight(1, 10, 0, 5, 10)
SubmitFlight(2, 10, 0, 5, 7)
Tick(20)
Quit()
";
    assert_eq!(
        run(script),
        [
            "2 Runways are now available",
            "Flight 1 scheduled - ETA: 10",
            "Flight 2 scheduled - ETA: 7",
            "Flight 2 has landed at time 7",
            "Flight 1 has landed at time 10",
            "Program Terminated!!",
        ]
    );
}

#[test]
fn test_priority_tie_break() {
    let script = "\
Initialize(1)
SubmitFlight(1, 1, 0, 5, 10)
SubmitFlight(2, 1, 0, 9, 5)
Quit()
";
    assert_eq!(
        run(script),
        [
            "1 Runways are now available",
            "Flight 1 scheduled - ETA: 10",
            "Flight 2 scheduled - ETA: 5",
            "Updated ETAs: [1: 15]",
            "Program Terminated!!",
        ]
    );
}

#[test]
fn test_cancel_releases_slot() {
    let script = "\
Initialize(1)
SubmitFlight(1, 1, 0, 5, 10)
SubmitFlight(2, 1, 0, 5, 10)
CancelFlight(1, 0)
Quit()
";
    assert_eq!(
        run(script),
        [
            "1 Runways are now available",
            "Flight 1 scheduled - ETA: 10",
            "Flight 2 scheduled - ETA: 20",
            "Flight 1 has been canceled",
            "Updated ETAs: [2: 10]",
            "Program Terminated!!",
        ]
    );
}

#[test]
fn test_cannot_cancel_in_progress() {
    let script = "\
Initialize(1)
SubmitFlight(1, 1, 0, 5, 10)
Tick(5)
CancelFlight(1, 5)
Quit()
";
    assert_eq!(
        run(script),
        [
            "1 Runways are now available",
            "Flight 1 scheduled - ETA: 10",
            "Cannot cancel. Flight 1 has already departed",
            "Program Terminated!!",
        ]
    );
}

#[test]
fn test_add_runways_repacks() {
    let script = "\
Initialize(1)
SubmitFlight(1, 1, 0, 5, 10)
SubmitFlight(2, 1, 0, 5, 10)
AddRunways(1, 0)
Quit()
";
    assert_eq!(
        run(script),
        [
            "1 Runways are now available",
            "Flight 1 scheduled - ETA: 10",
            "Flight 2 scheduled - ETA: 20",
            "Additional 1 Runways are now available",
            "Updated ETAs: [2: 10]",
            "Program Terminated!!",
        ]
    );
}

#[test]
fn test_ground_hold_scope() {
    let script = "\
Initialize(1)
SubmitFlight(1, 5, 0, 1, 5)
SubmitFlight(2, 7, 0, 1, 5)
GroundHold(5, 5, 0)
Quit()
";
    assert_eq!(
        run(script),
        [
            "1 Runways are now available",
            "Flight 1 scheduled - ETA: 5",
            "Flight 2 scheduled - ETA: 10",
            "Flights of the airlines in the range [5, 5] have been grounded",
            "Updated ETAs: [2: 5]",
            "Program Terminated!!",
        ]
    );
}

#[test]
fn test_reprioritize_then_queries() {
    let script = "\
Initialize(1)
SubmitFlight(1, 4, 0, 5, 10)
SubmitFlight(2, 4, 0, 5, 10)
Reprioritize(2, 0, 8)
PrintActive()
PrintSchedule(15, 30)
Quit()
";
    assert_eq!(
        run(script),
        [
            "1 Runways are now available",
            "Flight 1 scheduled - ETA: 10",
            "Flight 2 scheduled - ETA: 20",
            "Priority of Flight 2 has been updated to 8",
            "Updated ETAs: [1: 20, 2: 10]",
            "[flight1, airline4, runway1, start10, ETA20]",
            "[flight2, airline4, runway1, start0, ETA10]",
            "[1]",
            "Program Terminated!!",
        ]
    );
}

#[test]
fn test_landings_interleave_with_submissions() {
    let script = "\
Initialize(1)
SubmitFlight(1, 2, 0, 5, 4)
SubmitFlight(2, 2, 6, 5, 3)
Tick(9)
PrintActive()
Quit()
";
    assert_eq!(
        run(script),
        [
            "1 Runways are now available",
            "Flight 1 scheduled - ETA: 4",
            "Flight 1 has landed at time 4",
            "Flight 2 scheduled - ETA: 9",
            "Flight 2 has landed at time 9",
            "No active flights",
            "Program Terminated!!",
        ]
    );
}

#[test]
fn test_entity_errors() {
    let script = "\
Initialize(1)
CancelFlight(3, 0)
Reprioritize(3, 0, 5)
SubmitFlight(1, 2, 0, 5, 4)
SubmitFlight(1, 2, 0, 5, 4)
Quit()
";
    assert_eq!(
        run(script),
        [
            "1 Runways are now available",
            "Flight 3 does not exist",
            "Flight 3 not found",
            "Flight 1 scheduled - ETA: 4",
            "Duplicate FlightID",
            "Program Terminated!!",
        ]
    );
}

#[test]
fn test_invalid_inputs() {
    let script = "\
Initialize(0)
Initialize(1)
AddRunways(0, 0)
GroundHold(9, 2, 0)
Quit()
";
    assert_eq!(
        run(script),
        [
            "Invalid input.",
            "1 Runways are now available",
            "Invalid input.",
            "Invalid input.",
            "Program Terminated!!",
        ]
    );
}

#[test]
fn test_empty_schedule_window() {
    let script = "\
Initialize(2)
SubmitFlight(1, 1, 0, 5, 10)
PrintSchedule(1, 5)
Quit()
";
    assert_eq!(
        run(script),
        [
            "2 Runways are now available",
            "Flight 1 scheduled - ETA: 10",
            "There are no flights in that time period",
            "Program Terminated!!",
        ]
    );
}

#[test]
fn test_quit_without_trailing_commands() {
    let script = "\
Initialize(1)
Quit()
Initialize(5)
";
    assert_eq!(
        run(script),
        ["1 Runways are now available", "Program Terminated!!"]
    );
}
