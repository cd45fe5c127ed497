mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{ActiveCardVm, CardFace, QuizScreen, QuizVm, SummaryVm, submit_draft};
pub use time_fmt::format_elapsed;
