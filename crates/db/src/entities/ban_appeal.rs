//! Ban appeal entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Appeal review status.
///
/// Submissions always start out `pending`; every other value is set by an
/// admin action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum AppealStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "denied")]
    Denied,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
}

impl AppealStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
            Self::UnderReview => "under_review",
        }
    }

    /// Parse a wire representation back into a status.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "denied" => Some(Self::Denied),
            "under_review" => Some(Self::UnderReview),
            _ => None,
        }
    }
}

/// Fixed category set for the original ban.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "kebab-case")]
pub enum BanReason {
    #[sea_orm(string_value = "hacking")]
    Hacking,
    #[sea_orm(string_value = "toxicity")]
    Toxicity,
    #[sea_orm(string_value = "scamming")]
    Scamming,
    #[sea_orm(string_value = "exploiting")]
    Exploiting,
    #[sea_orm(string_value = "advertising")]
    Advertising,
    #[sea_orm(string_value = "inappropriate")]
    Inappropriate,
    #[sea_orm(string_value = "ban-evasion")]
    BanEvasion,
    #[sea_orm(string_value = "other")]
    Other,
}

impl BanReason {
    /// Wire representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hacking => "hacking",
            Self::Toxicity => "toxicity",
            Self::Scamming => "scamming",
            Self::Exploiting => "exploiting",
            Self::Advertising => "advertising",
            Self::Inappropriate => "inappropriate",
            Self::BanEvasion => "ban-evasion",
            Self::Other => "other",
        }
    }
}

/// Ban appeal model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ban_appeals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Minecraft username of the banned player.
    pub username: String,
    /// Discord tag for follow-up contact.
    pub discord_tag: String,
    /// Contact email address.
    pub email: String,
    /// Optional Minecraft account UUID.
    pub minecraft_uuid: Option<String>,
    /// Category of the original ban.
    pub ban_reason: BanReason,
    /// The player's case for being unbanned.
    pub appeal_reason: String,
    /// Optional supplementary context.
    pub additional_info: Option<String>,
    /// Current review status.
    pub status: AppealStatus,
    /// Staff response shown to the player.
    pub response: Option<String>,
    /// Staff member who handled the appeal.
    pub handled_by: Option<String>,
    /// When the appeal was submitted.
    pub created_at: DateTimeWithTimeZone,
    /// When the row was last mutated.
    pub updated_at: DateTimeWithTimeZone,
    /// When an admin changed the status.
    pub handled_at: Option<DateTimeWithTimeZone>,
    /// Submitter address, captured server-side when forwarded.
    pub ip_address: Option<String>,
    /// Submitting client's User-Agent header.
    pub user_agent: String,
    /// Whether the new-appeal webhook was delivered.
    pub webhook_sent: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
