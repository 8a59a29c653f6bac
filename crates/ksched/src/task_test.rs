//! Tests for the task table.

use super::task::*;

const CS: u16 = 0x08;

fn flags() -> Eflags {
    Eflags::RESERVED | Eflags::INTERRUPT
}

#[test]
fn spawn_assigns_sequential_tids() {
    let mut table: TaskTable<4> = TaskTable::new();
    assert_eq!(table.spawn(0x1000, 0x9000, CS, flags()), 0);
    assert_eq!(table.spawn(0x2000, 0xA000, CS, flags()), 1);

    let task = table.get(1);
    assert_eq!(task.state, TaskState::Ready);
    assert_eq!(task.op.eip, 0x2000);
    assert_eq!(task.op.esp, 0xA000);
    assert_eq!(task.gp, GpRegisters::zeroed());
    assert_eq!(task.time, 0);
}

#[test]
#[should_panic(expected = "task table full")]
fn spawn_panics_when_full() {
    let mut table: TaskTable<2> = TaskTable::new();
    table.spawn(0x1000, 0x9000, CS, flags());
    table.spawn(0x2000, 0xA000, CS, flags());
    table.spawn(0x3000, 0xB000, CS, flags());
}

#[test]
fn pick_next_walks_round_robin() {
    let mut table: TaskTable<4> = TaskTable::new();
    table.spawn(0x1000, 0x9000, CS, flags());
    table.spawn(0x2000, 0xA000, CS, flags());
    table.spawn(0x3000, 0xB000, CS, flags());

    assert_eq!(table.pick_next(None), Some(0));
    assert_eq!(table.pick_next(Some(0)), Some(1));
    assert_eq!(table.pick_next(Some(1)), Some(2));
    assert_eq!(table.pick_next(Some(2)), Some(0));
}

#[test]
fn pick_next_skips_terminated_tasks() {
    let mut table: TaskTable<4> = TaskTable::new();
    table.spawn(0x1000, 0x9000, CS, flags());
    table.spawn(0x2000, 0xA000, CS, flags());
    table.spawn(0x3000, 0xB000, CS, flags());

    table.terminate(1);
    assert_eq!(table.pick_next(Some(0)), Some(2));
    assert_eq!(table.pick_next(Some(2)), Some(0));
}

#[test]
fn a_lone_task_is_its_own_successor() {
    let mut table: TaskTable<4> = TaskTable::new();
    table.spawn(0x1000, 0x9000, CS, flags());
    assert_eq!(table.pick_next(Some(0)), Some(0));
}

#[test]
fn pick_next_reports_an_empty_table() {
    let mut table: TaskTable<4> = TaskTable::new();
    assert_eq!(table.pick_next(None), None);

    table.spawn(0x1000, 0x9000, CS, flags());
    table.terminate(0);
    assert_eq!(table.pick_next(Some(0)), None);
}
