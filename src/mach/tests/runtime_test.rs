use super::*;

#[test]
fn test_halts_on_return_with_empty_stack() {
    let mut r = Runtime::new(program(&[(RETURN, 0)]), World::empty());
    let step = r.step().unwrap();
    assert!(step.halted);
    assert_eq!(step.pc, 0);
    assert!(r.is_halted());
    let again = r.step().unwrap();
    assert!(again.halted);
    assert!(!again.pause);
}

#[test]
fn test_call_and_return() {
    let words = [(CALL | 2, 0), (RETURN, 0), (TURN_LEFT, 1), (RETURN, 2)];
    let mut r = Runtime::new(program(&words), World::empty());
    let step = r.step().unwrap();
    assert_eq!((step.address, step.pc, step.pause), (0, 2, false));
    assert_eq!(r.call_depth(), 1);
    let step = r.step().unwrap();
    assert!(step.pause);
    assert_eq!(step.world.heading(), Heading::North);
    let step = r.step().unwrap();
    assert_eq!((step.pc, step.pause, step.halted), (1, true, false));
    let step = r.step().unwrap();
    assert!(step.halted);
}

#[test]
fn test_loop_runs_body_count_times() {
    let words = [(PUSH | 3, 1), (TURN_LEFT, 2), (LOOP, 3), (RETURN, 0)];
    let mut r = Runtime::new(program(&words), World::empty());
    let pauses = run(&mut r).unwrap();
    let turns = pauses
        .iter()
        .filter(|s| s.instruction.bytecode() == TURN_LEFT)
        .count();
    assert_eq!(turns, 3);
    assert_eq!(r.world().heading(), Heading::South);
}

#[test]
fn test_conditional_jumps_pop_condition() {
    // facing east in the corner: left is walled, front is clear
    let words = [
        (LEFT_IS_CLEAR, 1),
        (J1MP | 4, 1),
        (FRONT_IS_CLEAR, 2),
        (J0MP | 4, 2),
        (DROP_BEEPER, 3),
        (RETURN, 0),
    ];
    let mut r = Runtime::new(program(&words), World::empty());
    run(&mut r).unwrap();
    assert!(r.world().on_beeper());
}

#[test]
fn test_logic_operators() {
    let words = [
        (LEFT_IS_CLEAR, 0),
        (RIGHT_IS_CLEAR, 0),
        (XOR, 0),
        (FRONT_IS_CLEAR, 0),
        (AND, 0),
        (J1MP | 7, 0),
        (DROP_BEEPER, 1),
        (RETURN, 0),
    ];
    let mut r = Runtime::new(program(&words), World::empty());
    run(&mut r).unwrap();
    assert!(!r.world().on_beeper());
}

#[test]
fn test_sensing_and_logic_never_pause() {
    let words = [
        (ON_BEEPER, 1),
        (NOT, 1),
        (BEEPER_AHEAD, 1),
        (OR, 1),
        (J0MP | 5, 0),
        (RETURN, 0),
    ];
    let mut r = Runtime::new(program(&words), World::empty());
    assert!(run(&mut r).unwrap().is_empty());
}

#[test]
fn test_illegal_bytecode() {
    let mut r = Runtime::new(program(&[(TURN_LEFT, 1), (0x7123, 2)]), World::empty());
    r.step().unwrap();
    let fault = r.step().unwrap_err();
    assert_eq!(fault.code(), FaultCode::IllegalBytecode(0x7123));
    assert_eq!(fault.address(), 1);
    assert_eq!(fault.to_string(), "illegal bytecode 7123 at 001");
}

#[test]
fn test_condition_underflow() {
    let mut r = Runtime::new(program(&[(AND, 0)]), World::empty());
    assert_eq!(r.step().unwrap_err().code(), FaultCode::ConditionUnderflow);
    let mut r = Runtime::new(program(&[(J0MP | 5, 1)]), World::empty());
    assert_eq!(r.step().unwrap_err().code(), FaultCode::ConditionUnderflow);
}

#[test]
fn test_loop_underflow() {
    let mut r = Runtime::new(program(&[(LOOP, 1)]), World::empty());
    let fault = r.step().unwrap_err();
    assert_eq!(fault.code(), FaultCode::LoopUnderflow);
}

#[test]
fn test_limits() {
    let limits = Limits {
        call_depth: 4,
        loop_depth: 2,
        condition_depth: 3,
    };
    let mut r = Runtime::with_limits(program(&[(CALL, 1)]), World::empty(), limits);
    let fault = run(&mut r).unwrap_err();
    assert_eq!(fault.code(), FaultCode::StackOverflow);
    assert_eq!(r.call_depth(), 4);

    let words = [(PUSH | 2, 0), (PUSH | 2, 0), (PUSH | 2, 0)];
    let mut r = Runtime::with_limits(program(&words), World::empty(), limits);
    let fault = run(&mut r).unwrap_err();
    assert_eq!((fault.code(), fault.address()), (FaultCode::LoopOverflow, 2));

    let words = [(ON_BEEPER, 0); 4];
    let mut r = Runtime::with_limits(program(&words), World::empty(), limits);
    let fault = run(&mut r).unwrap_err();
    assert_eq!((fault.code(), fault.address()), (FaultCode::ConditionOverflow, 3));
}

#[test]
fn test_fault_sticks_until_reset() {
    let words = [(MOVE_FORWARD, 1), (TURN_LEFT, 2), (MOVE_FORWARD, 3), (RETURN, 0)];
    let mut r = Runtime::new(program(&words), World::empty());
    let fault = run(&mut r).unwrap_err();
    assert_eq!(fault.address(), 2);
    assert_eq!(r.step().unwrap_err(), fault);
    assert_eq!(r.fault(), Some(&fault));
    assert_eq!(r.world().x(), 1);
    r.reset();
    assert_eq!(r.pc(), 0);
    assert_eq!(r.world(), &World::empty());
    assert!(r.fault().is_none());
    assert!(r.step().is_ok());
}

#[test]
fn test_load_clears_fault_and_rewinds() {
    let walled = [(TURN_LEFT, 1), (MOVE_FORWARD, 2), (RETURN, 0)];
    let mut r = Runtime::new(program(&walled), World::empty());
    assert!(run(&mut r).is_err());
    r.load(program(&[(DROP_BEEPER, 1), (RETURN, 0)]));
    assert_eq!(r.pc(), 0);
    assert!(r.fault().is_none());
    assert_eq!(r.world(), &World::empty());
    run(&mut r).unwrap();
    assert!(r.world().beeper_at(0, 0));
    assert_eq!(r.program().len(), 2);
}

#[test]
fn test_set_world_becomes_the_start() {
    let mut r = Runtime::new(program(&[(PICK_BEEPER, 1), (RETURN, 0)]), World::empty());
    assert_eq!(run(&mut r).unwrap_err().to_string(), "cell is empty (0, 0) at 000");
    let start = World::empty().drop_beeper_at(0, 0).unwrap();
    r.set_world(start.clone());
    assert_eq!(r.world(), &start);
    run(&mut r).unwrap();
    assert_eq!(r.world().count_beepers(), 0);
    r.reset();
    assert_eq!(r.world(), &start);
}

#[test]
fn test_running_past_memory() {
    let mut words = vec![(TURN_LEFT, 0); MEMORY_SIZE];
    words[0] = (JUMP | 0xfff, 0);
    let mut r = Runtime::new(program(&words), World::empty());
    r.step().unwrap();
    let fault = r.step().unwrap_err();
    assert_eq!(fault.code(), FaultCode::AddressOutOfRange);
    assert_eq!(fault.address(), 0xfff);
}

#[test]
fn test_batch_without_pause_keeps_running() {
    let mut r = Runtime::new(program(&[(JUMP, 0)]), World::empty());
    let never = AtomicBool::new(false);
    assert_eq!(r.execute(1000, &never), Event::Running);
    let raised = AtomicBool::new(true);
    assert_eq!(r.execute(1000, &raised), Event::Interrupted);
    assert_eq!(r.pc(), 0);
}
