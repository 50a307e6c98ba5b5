//! Terminal rendering of handler results.

use std::fmt::Write as _;

use serde::Serialize;

use ewaste_core::domain::{PickupRequest, Place, Profile};

use crate::error::AppError;
use crate::handlers::Navigation;
use crate::handlers::location::PickedAddress;
use crate::handlers::requests::{RequestList, SavedImage, TrackingView};
use crate::handlers::shell::DashboardView;

/// Human-readable form of a result.
pub trait Render {
    fn render(&self) -> String;
}

/// Bare notice, e.g. after a delete.
#[derive(Debug, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Render for Notice {
    fn render(&self) -> String {
        self.message.clone()
    }
}

#[derive(Debug, Serialize)]
pub struct ThemeView {
    pub theme: &'static str,
}

impl Render for ThemeView {
    fn render(&self) -> String {
        format!("Theme: {}", self.theme)
    }
}

#[derive(Debug, Serialize)]
pub struct RouteView {
    pub route: ewaste_core::domain::Route,
}

impl Render for RouteView {
    fn render(&self) -> String {
        format!("→ {}", self.route)
    }
}

/// Prints to stdout, as JSON when `json` is set.
pub fn emit<T: Serialize + Render>(value: &T, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value.render());
    }
    Ok(())
}

/// Prints a handler error to stderr.
pub fn error(err: &AppError, json: bool) {
    if json {
        let body = serde_json::json!({
            "error": err.to_string(),
            "redirect": err.route().map(|r| r.path()),
        });
        eprintln!("{body}");
        return;
    }
    eprintln!("{err}");
    if let Some(route) = err.route() {
        eprintln!("→ {route}");
    }
}

impl Render for Navigation {
    fn render(&self) -> String {
        match &self.message {
            Some(message) => format!("{message}\n→ {}", self.next),
            None => format!("→ {}", self.next),
        }
    }
}

impl Render for Profile {
    fn render(&self) -> String {
        let phone = if self.phone.is_empty() { "-" } else { &self.phone };
        format!(
            "Name:  {}\nEmail: {}\nPhone: {phone}",
            self.name, self.email
        )
    }
}

fn date(value: &Option<chrono::NaiveDateTime>) -> String {
    value
        .map(|d| d.format("%d %b %Y, %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

impl Render for PickupRequest {
    fn render(&self) -> String {
        let mut out = format!(
            "Request #{} [{}]\n  Device:    {} {} {}\n  Condition: {}\n  Quantity:  {}\n  Pickup:    {}",
            self.id,
            self.status.label(),
            self.device_type,
            self.brand,
            self.model,
            self.condition,
            self.quantity,
            self.pickup_address,
        );
        if let Some(detail) = self.status.detail() {
            let _ = write!(out, "\n  Status:    {detail}");
        }
        if let Some(remarks) = &self.additional_remarks {
            let _ = write!(out, "\n  Remarks:   {remarks}");
        }
        let _ = write!(
            out,
            "\n  Created:   {}\n  Updated:   {}",
            date(&self.created_at),
            date(&self.updated_at)
        );
        out
    }
}

impl Render for RequestList {
    fn render(&self) -> String {
        if self.rows.is_empty() {
            return if self.total == 0 {
                "No requests yet.".to_string()
            } else {
                format!("No requests match the filters ({} total).", self.total)
            };
        }

        let mut out = format!("Showing {} of {} requests\n", self.rows.len(), self.total);
        for row in &self.rows {
            let r = &row.request;
            let image = match &row.image {
                Some(info) => format!("[{} {}B]", info.content_type, info.size),
                None => "[no image]".to_string(),
            };
            let _ = writeln!(
                out,
                "#{:<5} {:<10} {:<10} {:<24} {:<8} x{:<4} {}",
                r.id,
                r.status.short_label(),
                r.device_type,
                format!("{} {}", r.brand, r.model),
                r.condition,
                r.quantity,
                image,
            );
            if let Some(detail) = row.detail {
                let _ = writeln!(out, "       {detail}");
            }
        }
        out.trim_end().to_string()
    }
}

impl Render for TrackingView {
    fn render(&self) -> String {
        let mut out = self.request.render();
        out.push_str("\n\nProgress");
        for step in &self.steps {
            let marker = match step.state {
                "done" => "[x]",
                "active" => "[>]",
                _ => "[ ]",
            };
            let _ = write!(out, "\n  {marker} {:<17} {}", step.label, step.detail);
        }
        match &self.image {
            Some(info) => {
                let _ = write!(out, "\n\nProof image: {} ({} bytes)", info.content_type, info.size);
            }
            None => out.push_str("\n\nProof image: unavailable"),
        }
        out
    }
}

impl Render for SavedImage {
    fn render(&self) -> String {
        format!(
            "Saved {} ({} bytes) to {}",
            self.image.content_type,
            self.image.size,
            self.path.display()
        )
    }
}

impl Render for Place {
    fn render(&self) -> String {
        format!("{}  ({:.6}, {:.6})", self.display_name, self.lat, self.lon)
    }
}

impl Render for Vec<Place> {
    fn render(&self) -> String {
        self.iter()
            .enumerate()
            .map(|(i, place)| format!("{}. {}", i + 1, place.render()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Render for PickedAddress {
    fn render(&self) -> String {
        self.address.clone()
    }
}

impl Render for DashboardView {
    fn render(&self) -> String {
        let mut out = format!("{}\n{}\n", self.headline, self.tagline);
        for link in &self.links {
            let _ = write!(out, "\n  {:<16} {}", link.label, link.route);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use ewaste_core::domain::{RequestStatus, Route};

    use super::*;
    use crate::handlers::requests::RequestRow;
    use crate::handlers::testing::pickup;

    #[test]
    fn test_navigation_text() {
        let nav = Navigation::with_message(Route::Dashboard, "Login successful");
        assert_eq!(nav.render(), "Login successful\n→ /dashboard");
    }

    #[test]
    fn test_navigation_json_uses_path() {
        let value = serde_json::to_value(Navigation::to(Route::TrackRequest(4))).unwrap();
        assert_eq!(value, serde_json::json!({ "next": "/requests/track/4" }));
    }

    #[test]
    fn test_list_placeholder_for_missing_image() {
        let list = RequestList {
            total: 2,
            rows: vec![RequestRow::new(pickup(1, RequestStatus::PickupScheduled), None)],
        };
        let text = list.render();
        assert!(text.starts_with("Showing 1 of 2 requests"));
        assert!(text.contains("Scheduled"));
        assert!(text.contains("[no image]"));
        assert!(text.contains("A pickup partner has been scheduled to collect your items."));
    }

    #[test]
    fn test_request_detail_shows_status_meaning() {
        let text = pickup(3, RequestStatus::Rejected).render();
        assert!(text.starts_with("Request #3 [Rejected]"));
        assert!(text.contains(
            "Status:    Unfortunately, this request could not be accepted. Please review the details."
        ));

        let text = pickup(4, RequestStatus::Other("ON_HOLD".into())).render();
        assert!(!text.contains("Status:"));
    }
}
