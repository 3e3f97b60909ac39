// Gateway module for the backend API - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod client;
mod gateway;
mod types;

#[cfg(test)]
pub(crate) mod testutil;

// Public re-exports - the ONLY way to access API functionality
pub use gateway::ApiGateway;
pub use types::{
    ActivityLog, AdminStats, Announcement, Attachment, AuthResponse, ContactInfo,
    DeleteSocietyResponse, Event, EventFeedback, Health, Member, MessageResponse, NewAnnouncement,
    NewEvent, NewMember, NewSociety, ReadReceipt, Role, Society, SocietyStats, SocietySummary,
    SummaryEvent, SummaryMember, SummarySociety, SummaryStatistics, User,
};
