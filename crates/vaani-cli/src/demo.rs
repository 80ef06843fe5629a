//! Canned host data and an offline portal for terminal sessions.

use std::sync::Arc;

use async_trait::async_trait;

use vaani_core::{
    AppointmentInfo, BookingRequest, BookingResponse, CentreInfo, DayProgress, DaySchedule,
    HostPage, LoginRequest, LoginResponse, PortalClient, PortalError, ProgressView, ScheduleView,
};

use crate::console::ConsoleNavigator;

/// Host page backed by the console navigator and fixed demo content.
pub struct DemoHost {
    nav: Arc<ConsoleNavigator>,
    name: Option<String>,
}

impl DemoHost {
    #[must_use]
    pub fn new(nav: Arc<ConsoleNavigator>, name: Option<String>) -> Self {
        Self { nav, name }
    }
}

#[async_trait]
impl HostPage for DemoHost {
    async fn current_path(&self) -> String {
        self.nav.current()
    }

    async fn display_name(&self) -> Option<String> {
        self.name.clone()
    }

    async fn centres(&self) -> Vec<CentreInfo> {
        vec![
            CentreInfo {
                centre_id: "1".to_string(),
                name: "Niramaya Wellness Centre".to_string(),
            },
            CentreInfo {
                centre_id: "2".to_string(),
                name: "City Ayurveda Centre".to_string(),
            },
            CentreInfo {
                centre_id: "3".to_string(),
                name: "Riverside Retreat".to_string(),
            },
        ]
    }

    async fn appointments(&self) -> Vec<AppointmentInfo> {
        vec![AppointmentInfo {
            id: "1".to_string(),
            plan: "Weight Loss Short".to_string(),
            has_schedule: true,
            has_progress: true,
        }]
    }

    async fn schedule(&self) -> Option<ScheduleView> {
        Some(ScheduleView {
            plan: "Weight Loss Short".to_string(),
            start_date: "22 September 2025".to_string(),
            duration: "7 days".to_string(),
            therapy_time: "Morning".to_string(),
            status: "Approved".to_string(),
            first_day: Some(DaySchedule {
                title: "Day 1 - Monday, 22 September".to_string(),
                slots: vec![
                    "Abhyanga full body massage".to_string(),
                    "Swedana steam therapy".to_string(),
                ],
            }),
        })
    }

    async fn progress(&self) -> Option<ProgressView> {
        Some(ProgressView {
            plan: "Weight Loss Short".to_string(),
            start_date: "22 September 2025".to_string(),
            duration: "7 days".to_string(),
            status: "In Progress".to_string(),
            first_day: Some(DayProgress {
                title: "Day 3 - Wednesday, 24 September".to_string(),
                score: Some("82%".to_string()),
                vitals: vec!["Blood pressure 120/80, pulse 72".to_string()],
            }),
        })
    }
}

/// Portal that accepts every submission locally.
pub struct DemoPortal;

#[async_trait]
impl PortalClient for DemoPortal {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, PortalError> {
        tracing::info!(username = %request.username, "Demo login accepted");
        Ok(LoginResponse {
            success: true,
            redirect: None,
            message: None,
        })
    }

    async fn book_detox(&self, request: &BookingRequest) -> Result<BookingResponse, PortalError> {
        tracing::info!(
            centre = %request.centre_id,
            plan = %request.plan_type,
            date = %request.start_date,
            "Demo booking accepted"
        );
        Ok(BookingResponse {
            success: true,
            message: None,
        })
    }
}
