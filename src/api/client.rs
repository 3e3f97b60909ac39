//! Domain endpoint wrappers. Each call is a fixed path and method over the
//! generic exchange in `gateway`; payloads are forwarded verbatim and the
//! backend's typed response is returned unchanged.

use bytes::Bytes;
use reqwest::Method;
use serde_json::{json, Value};

use super::gateway::ApiGateway;
use super::types::{
    ActivityLog, AdminStats, Announcement, AuthResponse, DeleteSocietyResponse, Event, Health,
    Member, MessageResponse, NewAnnouncement, NewEvent, NewMember, NewSociety, Society,
    SocietyStats, SocietySummary,
};
use crate::utils::ApiError;

impl ApiGateway {
    // Authentication

    pub async fn admin_login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.request(
            Method::POST,
            "/admin/login",
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn society_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        self.request(
            Method::POST,
            "/society/login",
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn society_register(&self, data: &NewSociety) -> Result<AuthResponse, ApiError> {
        self.request(Method::POST, "/society/register", Some(json!(data)))
            .await
    }

    // Society management

    pub async fn society_profile(&self) -> Result<Society, ApiError> {
        self.request(Method::GET, "/society/profile", None).await
    }

    pub async fn update_society_profile(&self, data: &Value) -> Result<Society, ApiError> {
        self.request(Method::PUT, "/society/profile", Some(data.clone()))
            .await
    }

    pub async fn societies(&self) -> Result<Vec<Society>, ApiError> {
        self.request(Method::GET, "/admin/societies", None).await
    }

    pub async fn delete_society(&self, id: &str) -> Result<DeleteSocietyResponse, ApiError> {
        self.request(Method::DELETE, &format!("/admin/society/{}", id), None)
            .await
    }

    pub async fn society_members(&self, society_id: &str) -> Result<Vec<Member>, ApiError> {
        self.request(
            Method::GET,
            &format!("/admin/society/{}/members", society_id),
            None,
        )
        .await
    }

    pub async fn society_events(&self, society_id: &str) -> Result<Vec<Event>, ApiError> {
        self.request(
            Method::GET,
            &format!("/admin/society/{}/events", society_id),
            None,
        )
        .await
    }

    pub async fn society_summary(&self, society_id: &str) -> Result<SocietySummary, ApiError> {
        self.request(
            Method::GET,
            &format!("/admin/society/{}/summary", society_id),
            None,
        )
        .await
    }

    // Member management

    pub async fn add_member(&self, data: &NewMember) -> Result<Member, ApiError> {
        self.request(Method::POST, "/society/members", Some(json!(data)))
            .await
    }

    pub async fn members(&self) -> Result<Vec<Member>, ApiError> {
        self.request(Method::GET, "/society/members", None).await
    }

    pub async fn update_member(&self, id: &str, data: &Value) -> Result<Member, ApiError> {
        self.request(
            Method::PUT,
            &format!("/society/members/{}", id),
            Some(data.clone()),
        )
        .await
    }

    pub async fn delete_member(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.request(Method::DELETE, &format!("/society/members/{}", id), None)
            .await
    }

    pub async fn all_members(&self) -> Result<Vec<Member>, ApiError> {
        self.request(Method::GET, "/admin/members", None).await
    }

    // Event management

    pub async fn add_event(&self, data: &NewEvent) -> Result<Event, ApiError> {
        self.request(Method::POST, "/society/events", Some(json!(data)))
            .await
    }

    pub async fn events(&self) -> Result<Vec<Event>, ApiError> {
        self.request(Method::GET, "/society/events", None).await
    }

    pub async fn update_event(&self, id: &str, data: &Value) -> Result<Event, ApiError> {
        self.request(
            Method::PUT,
            &format!("/society/events/{}", id),
            Some(data.clone()),
        )
        .await
    }

    pub async fn delete_event(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.request(Method::DELETE, &format!("/society/events/{}", id), None)
            .await
    }

    pub async fn all_events(&self) -> Result<Vec<Event>, ApiError> {
        self.request(Method::GET, "/admin/events", None).await
    }

    // Announcements

    pub async fn announcements(&self) -> Result<Vec<Announcement>, ApiError> {
        self.request(Method::GET, "/society/announcements", None)
            .await
    }

    pub async fn create_announcement(
        &self,
        data: &NewAnnouncement,
    ) -> Result<Announcement, ApiError> {
        self.request(Method::POST, "/admin/announcements", Some(json!(data)))
            .await
    }

    pub async fn all_announcements(&self) -> Result<Vec<Announcement>, ApiError> {
        self.request(Method::GET, "/admin/announcements", None).await
    }

    pub async fn update_announcement(
        &self,
        id: &str,
        data: &Value,
    ) -> Result<Announcement, ApiError> {
        self.request(
            Method::PUT,
            &format!("/admin/announcements/{}", id),
            Some(data.clone()),
        )
        .await
    }

    pub async fn delete_announcement(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.request(
            Method::DELETE,
            &format!("/admin/announcements/{}", id),
            None,
        )
        .await
    }

    pub async fn mark_announcement_read(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.request(
            Method::POST,
            &format!("/society/announcements/{}/read", id),
            None,
        )
        .await
    }

    // Dashboard stats and activity

    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.request(Method::GET, "/admin/stats", None).await
    }

    pub async fn society_stats(&self) -> Result<SocietyStats, ApiError> {
        self.request(Method::GET, "/society/stats", None).await
    }

    pub async fn recent_activities(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityLog>, ApiError> {
        let endpoint = match limit {
            Some(limit) => format!("/admin/activities?limit={}", limit),
            None => "/admin/activities".to_string(),
        };
        self.request(Method::GET, &endpoint, None).await
    }

    // Reports

    pub async fn excel_report(&self, society_ids: &[String]) -> Result<Bytes, ApiError> {
        self.request_binary("/admin/report/excel", Some(report_payload(society_ids)))
            .await
    }

    pub async fn pdf_report(&self, society_ids: &[String]) -> Result<Bytes, ApiError> {
        self.request_binary("/admin/report/pdf", Some(report_payload(society_ids)))
            .await
    }

    pub async fn society_excel_report(&self, society_id: &str) -> Result<Bytes, ApiError> {
        self.request_binary(&format!("/admin/society/{}/report/excel", society_id), None)
            .await
    }

    pub async fn society_pdf_report(&self, society_id: &str) -> Result<Bytes, ApiError> {
        self.request_binary(&format!("/admin/society/{}/report/pdf", society_id), None)
            .await
    }

    // Health

    pub async fn health_check(&self) -> Result<Health, ApiError> {
        self.request(Method::GET, "/health", None).await
    }
}

fn report_payload(society_ids: &[String]) -> Value {
    if society_ids.is_empty() {
        json!({})
    } else {
        json!({ "societyIds": society_ids })
    }
}
