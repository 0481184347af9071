//! Core data models for the rota engine.
//!
//! This module contains the input models read from the rota data files:
//! registrars and their leave, the duty rota, and training blocks.

mod block;
mod leave;
mod registrar;
mod rota;

pub use block::{
    BlockPlacement, BlockTimetable, RegistrarBlocks, SessionSlot, TimetableDay,
    parse_block_timetables,
};
pub use leave::{
    INVALID_LEAVE_DATE, LeaveRecord, LeaveType, RawLeaveRecord, RecordWarning,
    parse_leave_records,
};
pub use registrar::{Allowance, Registrar};
pub use rota::{
    DayShifts, FlatRotaEntry, Role, Rota, RotaDay, RotaEntry, Session, SessionShifts,
    StructuredRotaEntry,
};
