mod admin_vm;
mod category_vm;
mod quiz_vm;
mod ranking_vm;
mod result_vm;
mod time_fmt;

pub use admin_vm::{
    AdminDetailVm, AdminRowVm, AdminTabVm, map_admin_rows, map_admin_tabs, upload_error_message,
    upload_success_message,
};
pub use category_vm::{CategoryVm, CountChoiceVm, category_title, count_choices, map_categories};
pub use quiz_vm::{OptionVm, QuestionCardVm, image_src, map_question_card};
pub use ranking_vm::{RankRowVm, map_rank_rows};
pub use result_vm::{NO_EXPLANATION, ResultItemVm, ResultVm, map_result};
