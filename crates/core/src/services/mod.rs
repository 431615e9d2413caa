//! Business logic services.

pub mod appeal;
pub mod notifier;

pub use appeal::{
    AppealService, AppealStatus, BanReason, SubmitAppealInput, SubmitMeta, UpdateStatusInput,
};
pub use notifier::AppealNotifier;
