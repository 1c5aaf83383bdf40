mod admin_vm;
mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use admin_vm::{ResultRowVm, SettingsFormVm, map_result_rows};
pub use quiz_vm::{LOW_TIME_SECS, QuizOptionVm, QuizVm, is_low_time, map_quiz};
pub use results_vm::{ResultsVm, ReviewItemVm, map_results};
pub use time_fmt::{format_datetime, format_timer};
