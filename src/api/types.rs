use serde::{Deserialize, Serialize};

/// Role of an authenticated principal. The backend exposes two separate
/// authorization surfaces; which one a session may use is fixed at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Society,
}

impl Role {
    /// Login endpoint for this role.
    pub fn login_endpoint(self) -> &'static str {
        match self {
            Role::Admin => "/admin/login",
            Role::Society => "/society/login",
        }
    }

    /// Idempotent authenticated endpoint used to confirm a stored token is
    /// still accepted. The response body is discarded.
    pub fn probe_endpoint(self) -> &'static str {
        match self {
            Role::Admin => "/admin/societies",
            Role::Society => "/society/profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "administrator",
            Role::Society => "society",
        }
    }
}

/// The authenticated principal, as returned by the login and registration
/// endpoints and as persisted across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
}

/// Successful login/registration payload: a fresh bearer token plus the
/// identity it proves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Society {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub email: String,
    pub profile_pic: Option<String>,
    pub contact_info: Option<ContactInfo>,
    pub established_year: Option<u32>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
    pub total_members: Option<u64>,
    pub total_events: Option<u64>,
    pub last_activity: Option<String>,
    pub member_count: Option<u64>,
    pub event_count: Option<u64>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: String,
    pub society_id: String,
    pub name: String,
    pub department: String,
    pub enrollment_no: String,
    pub designation: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub year: Option<String>,
    pub is_active: Option<bool>,
    pub profile_pic: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    pub society_name: Option<String>,
    pub joined_date: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFeedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub society_id: String,
    pub event_name: String,
    pub day: String,
    pub members_participated: Vec<String>,
    pub prizes_won: String,
    pub photos_link: String,
    pub report_link: String,
    pub event_type: Option<String>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub audience: Option<u64>,
    pub duration: Option<String>,
    pub status: Option<String>,
    pub feedback: Option<EventFeedback>,
    pub society_name: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadReceipt {
    pub society_id: String,
    pub read_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub target_societies: Vec<Society>,
    pub created_by: String,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub attachments: Option<Vec<Attachment>>,
    pub read_by: Option<Vec<ReadReceipt>>,
    pub expires_at: Option<String>,
    pub is_pinned: Option<bool>,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    #[serde(rename = "_id")]
    pub id: String,
    pub admin_id: String,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<String>,
    pub target_name: Option<String>,
    pub details: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_societies: u64,
    pub total_members: u64,
    pub total_events: u64,
    pub total_announcements: u64,
    pub active_societies: Option<u64>,
    pub recent_events: Option<u64>,
    pub pending_announcements: Option<u64>,
    pub average_members_per_society: Option<f64>,
    pub average_events_per_society: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocietyStats {
    pub total_members: u64,
    pub total_events: u64,
    pub upcoming_events: Option<u64>,
    pub this_month_events: Option<u64>,
    pub new_members: Option<u64>,
    pub recent_events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySociety {
    pub id: String,
    pub name: String,
    pub email: String,
    pub category: Option<String>,
    pub established_year: Option<u32>,
    pub is_active: bool,
    pub created_at: String,
    pub last_activity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    pub total_members: u64,
    pub total_events: u64,
    pub new_members_this_month: u64,
    pub events_this_month: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub designation: String,
    pub joined_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEvent {
    #[serde(rename = "_id")]
    pub id: String,
    pub event_name: String,
    pub day: String,
    pub prizes_won: String,
}

/// Condensed per-society view used by the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocietySummary {
    pub society: SummarySociety,
    pub statistics: SummaryStatistics,
    pub recent_members: Vec<SummaryMember>,
    pub recent_events: Vec<SummaryEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
    pub uptime: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSocietyResponse {
    pub message: String,
    pub deleted_members: u64,
    pub deleted_events: u64,
}

// Request payloads

/// Registration payload for a new society account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSociety {
    pub name: String,
    pub description: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub established_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    pub department: String,
    pub enrollment_no: String,
    pub designation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub event_name: String,
    pub day: String,
    pub members_participated: Vec<String>,
    pub prizes_won: String,
    pub photos_link: String,
    pub report_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<EventFeedback>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_societies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_serde_tags() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Society).unwrap(), "\"society\"");
        assert_eq!(serde_json::from_str::<Role>("\"society\"").unwrap(), Role::Society);
    }

    #[test]
    fn test_role_endpoint_table() {
        assert_eq!(Role::Admin.login_endpoint(), "/admin/login");
        assert_eq!(Role::Society.login_endpoint(), "/society/login");
        assert_eq!(Role::Admin.probe_endpoint(), "/admin/societies");
        assert_eq!(Role::Society.probe_endpoint(), "/society/profile");
    }

    #[test]
    fn test_user_round_trip_without_name() {
        let user: User =
            serde_json::from_str(r#"{"id":"u1","email":"x@y.z","role":"admin"}"#).unwrap();
        assert_eq!(user.name, None);
        assert_eq!(user.role, Role::Admin);

        // A missing name must stay missing when re-serialized, not become null.
        let raw = serde_json::to_string(&user).unwrap();
        assert!(!raw.contains("name"));
        assert_eq!(serde_json::from_str::<User>(&raw).unwrap(), user);
    }

    #[test]
    fn test_auth_response_shape() {
        let auth: AuthResponse = serde_json::from_str(
            r#"{"token":"abc","user":{"id":"1","email":"a@b.c","name":"Drama Club","role":"society"}}"#,
        )
        .unwrap();
        assert_eq!(auth.token, "abc");
        assert_eq!(auth.user.name.as_deref(), Some("Drama Club"));
    }

    #[test]
    fn test_new_member_omits_empty_fields() {
        let member = NewMember {
            name: "Asha".into(),
            department: "CSE".into(),
            enrollment_no: "21CS042".into(),
            designation: "Treasurer".into(),
            email: None,
            phone: None,
            year: None,
            profile_pic: None,
            achievements: None,
            skills: None,
        };
        let raw = serde_json::to_string(&member).unwrap();
        assert_eq!(
            raw,
            r#"{"name":"Asha","department":"CSE","enrollmentNo":"21CS042","designation":"Treasurer"}"#
        );
    }
}
