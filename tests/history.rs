//! Shallow and deep history re-entry.
//!
//! ```text
//! A
//! ├── A1
//! │   ├── A11
//! │   └── A12 (initial)
//! └── A2 (initial)
//! B (initial)
//! ```

use statechart::{
    event_enum, Current, Event, HistoryKind, Instance, Machine, MachineBuilder, StateId,
};
use std::sync::Arc;

event_enum! {
    enum Ev {
        B,
        AShallow,
        ADeep,
        A1,
        A11,
        A12,
        A,
    }
}

type Log = Vec<String>;

fn enter(text: &'static str) -> impl Fn(&Event, &mut Log) + Send + Sync + 'static {
    move |_, log| log.push(format!("enter {text}"))
}

fn exit(text: &'static str) -> impl Fn(&Event, &mut Log) + Send + Sync + 'static {
    move |_, log| log.push(format!("exit {text}"))
}

struct Fixture {
    machine: Arc<Machine<Log>>,
    a: StateId,
    a11: StateId,
    a12: StateId,
    a2: StateId,
    b: StateId,
}

fn fixture() -> Fixture {
    let mut sm: MachineBuilder<Log> = MachineBuilder::new();
    let a = sm.state("A").entry("", enter("A")).exit("", exit("A")).build().unwrap();
    let a1 = sm
        .substate(a, "A1")
        .entry("", enter("A1"))
        .exit("", exit("A1"))
        .build()
        .unwrap();
    let a2 = sm
        .substate(a, "A2")
        .initial()
        .entry("", enter("A2"))
        .exit("", exit("A2"))
        .build()
        .unwrap();
    let a11 = sm
        .substate(a1, "A11")
        .entry("", enter("A11"))
        .exit("", exit("A11"))
        .build()
        .unwrap();
    let a12 = sm
        .substate(a1, "A12")
        .initial()
        .entry("", enter("A12"))
        .exit("", exit("A12"))
        .build()
        .unwrap();
    let b = sm.state("B").initial().build().unwrap();

    sm.add_transition(a, Ev::B, b).unwrap();
    sm.transition(b, Ev::AShallow, a)
        .history(HistoryKind::Shallow)
        .build()
        .unwrap();
    sm.transition(b, Ev::ADeep, a)
        .history(HistoryKind::Deep)
        .build()
        .unwrap();
    sm.add_transition(b, Ev::A1, a1).unwrap();
    sm.add_transition(b, Ev::A11, a11).unwrap();
    sm.add_transition(b, Ev::A12, a12).unwrap();
    sm.add_transition(b, Ev::A, a).unwrap();

    Fixture {
        machine: Arc::new(sm.finalize().unwrap()),
        a,
        a11,
        a12,
        a2,
        b,
    }
}

fn run(fixture: &Fixture, events: &[Ev]) -> Instance<Log> {
    let mut smi = Instance::new(Arc::clone(&fixture.machine), Log::new());
    smi.initialize(&Event::new(-1)).unwrap();
    assert_eq!(smi.current(), Current::Active(fixture.b));
    for &event in events {
        assert!(smi.deliver(&Event::new(event)).unwrap().is_handled());
    }
    smi
}

#[test]
fn history_scenarios() {
    let fixture = fixture();
    let cases: Vec<(&str, Vec<Ev>, StateId)> = vec![
        ("initial transition to shallow history", vec![Ev::AShallow], fixture.a2),
        ("initial transition to deep history", vec![Ev::ADeep], fixture.a2),
        ("shallow history", vec![Ev::A11, Ev::B, Ev::AShallow], fixture.a12),
        ("shallow history2", vec![Ev::AShallow, Ev::B, Ev::AShallow], fixture.a2),
        ("deep history", vec![Ev::A11, Ev::B, Ev::ADeep], fixture.a11),
    ];

    for (name, events, want) in cases {
        let smi = run(&fixture, &events);
        assert_eq!(smi.current_state(), Some(want), "{name}");
    }
}

#[test]
fn shallow_history_resumes_child_then_initial_descent() {
    let fixture = fixture();
    let mut smi = run(&fixture, &[Ev::A11, Ev::B]);
    smi.ext_mut().clear();

    smi.deliver(&Event::new(Ev::AShallow)).unwrap();
    assert_eq!(smi.ext(), &vec!["enter A", "enter A1", "enter A12"]);
}

#[test]
fn deep_history_resumes_exact_leaf() {
    let fixture = fixture();
    let mut smi = run(&fixture, &[Ev::A11, Ev::B]);
    smi.ext_mut().clear();

    smi.deliver(&Event::new(Ev::ADeep)).unwrap();
    assert_eq!(smi.ext(), &vec!["enter A", "enter A1", "enter A11"]);
    assert_eq!(smi.current_state(), Some(fixture.a11));
}

#[test]
fn first_history_entry_matches_plain_entry() {
    let fixture = fixture();

    let plain = run(&fixture, &[Ev::A]);
    let shallow = run(&fixture, &[Ev::AShallow]);
    let deep = run(&fixture, &[Ev::ADeep]);

    assert_eq!(plain.ext(), &vec!["enter A", "enter A2"]);
    assert_eq!(shallow.ext(), plain.ext());
    assert_eq!(deep.ext(), plain.ext());
    assert_eq!(plain.current_state(), deep.current_state());
}

#[test]
fn history_survives_unrelated_visits() {
    let fixture = fixture();
    let smi = run(
        &fixture,
        &[Ev::A11, Ev::B, Ev::A, Ev::B, Ev::ADeep],
    );

    // the plain visit to A2 overwrote the record, so deep history resumes A2
    assert_eq!(smi.current_state(), Some(fixture.a2));

    let smi = run(&fixture, &[Ev::A11, Ev::B, Ev::AShallow, Ev::B, Ev::ADeep]);
    assert_eq!(smi.current_state(), Some(fixture.a12));
}

#[test]
fn plain_transition_ignores_recorded_history() {
    let fixture = fixture();
    let smi = run(&fixture, &[Ev::A11, Ev::B, Ev::A]);
    assert_eq!(smi.current_state(), Some(fixture.a2));
}

#[test]
fn history_target_advertises_requested_kinds() {
    let fixture = fixture();
    let a = fixture.machine.state(fixture.a).unwrap();

    assert!(a.history().shallow);
    assert!(a.history().deep);
    assert!(fixture.machine.history().contains(HistoryKind::Deep));
    assert!(fixture
        .machine
        .state(fixture.b)
        .unwrap()
        .history()
        .is_empty());
}
