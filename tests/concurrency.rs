//! One finalized machine driving many instances across worker threads.

use statechart::{Event, HistoryKind, Instance, Machine, MachineBuilder, StateId};
use std::sync::Arc;

const EV_TOGGLE: i32 = 0;
const EV_PAUSE: i32 = 1;
const EV_RESUME: i32 = 2;

#[derive(Debug, Default)]
struct Counter {
    entries: u32,
    toggles: u32,
}

struct Switch {
    machine: Arc<Machine<Counter, u32>>,
    on: StateId,
    off: StateId,
}

fn switch() -> Switch {
    let mut sm: MachineBuilder<Counter, u32> = MachineBuilder::new();
    let running = sm.state("Running").initial().build().unwrap();
    let paused = sm.state("Paused").build().unwrap();
    let off = sm
        .substate(running, "Off")
        .initial()
        .entry("count", |_: &Event<u32>, c: &mut Counter| c.entries += 1)
        .build()
        .unwrap();
    let on = sm
        .substate(running, "On")
        .entry("count", |_: &Event<u32>, c: &mut Counter| c.entries += 1)
        .build()
        .unwrap();

    for (from, to) in [(off, on), (on, off)] {
        sm.transition(from, EV_TOGGLE, to)
            .action("tally", |event: &Event<u32>, c: &mut Counter| {
                c.toggles += event.data
            })
            .build()
            .unwrap();
    }
    sm.add_transition(running, EV_PAUSE, paused).unwrap();
    sm.transition(paused, EV_RESUME, running)
        .history(HistoryKind::Deep)
        .build()
        .unwrap();

    Switch {
        machine: Arc::new(sm.finalize().unwrap()),
        on,
        off,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn instances_share_machine_across_tasks() {
    let switch = switch();

    let handles: Vec<_> = (0..16u32)
        .map(|task| {
            let machine = Arc::clone(&switch.machine);
            tokio::spawn(async move {
                let mut smi = Instance::new(machine, Counter::default());
                smi.initialize(&Event::with_data(-1, 0)).unwrap();
                for step in 0..(task + 1) {
                    smi.deliver(&Event::with_data(EV_TOGGLE, 1)).unwrap();
                    if step % 3 == 0 {
                        smi.deliver(&Event::with_data(EV_PAUSE, 0)).unwrap();
                        smi.deliver(&Event::with_data(EV_RESUME, 0)).unwrap();
                    }
                    tokio::task::yield_now().await;
                }
                (task, smi.current_state(), smi.into_ext())
            })
        })
        .collect();

    for handle in handles {
        let (task, state, counter) = handle.await.unwrap();
        let toggles = task + 1;
        assert_eq!(counter.toggles, toggles);

        let expected = if toggles % 2 == 0 { switch.off } else { switch.on };
        assert_eq!(state, Some(expected), "task {task}");

        // initial entry, one per toggle, one per deep-history resume
        let resumes = (0..toggles).filter(|step| step % 3 == 0).count() as u32;
        assert_eq!(counter.entries, 1 + toggles + resumes, "task {task}");
    }
}

#[test]
fn machine_and_instances_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    fn assert_send<T: Send>() {}

    assert_send_sync::<Machine<Counter, u32>>();
    assert_send::<Instance<Counter, u32>>();
}

#[test]
fn scoped_threads_read_one_machine() {
    let switch = switch();

    let states: Vec<Option<StateId>> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4u32)
            .map(|toggles| {
                let machine = Arc::clone(&switch.machine);
                scope.spawn(move || {
                    let mut smi = Instance::new(machine, Counter::default());
                    smi.initialize(&Event::with_data(-1, 0)).unwrap();
                    for _ in 0..toggles {
                        smi.deliver(&Event::with_data(EV_TOGGLE, 1)).unwrap();
                    }
                    smi.current_state()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert_eq!(
        states,
        vec![Some(switch.off), Some(switch.on), Some(switch.off), Some(switch.on)]
    );
}
