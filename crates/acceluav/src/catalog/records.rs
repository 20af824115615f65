//! Site content records.
//!
//! Field names serialize in camelCase so seed data and exported JSON keep the
//! shape the site front end consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collection::{require, Placement, Record, Reviewable};
use crate::error::Result;

/// A labelled specification row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    /// Row label, e.g. `"Range"`.
    pub label: String,
    /// Row value, e.g. `"40 km"`.
    pub value: String,
}

/// An open role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Identifier, e.g. `"eng-01"`.
    pub id: String,
    /// Role title.
    pub title: String,
    /// Owning department.
    pub department: String,
    /// Where the role is based.
    pub location: String,
    /// Employment type, e.g. `"Full-time"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Role summary.
    pub description: String,
    /// Required skills, one per bullet.
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// Review state of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Not yet looked at.
    #[default]
    Pending,
    /// Read by the hiring team.
    Reviewed,
    /// Offer extended.
    Accepted,
    /// Declined.
    Rejected,
}

/// A job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Identifier, e.g. `"app-1712345678901"`.
    pub id: String,
    /// The job applied to.
    pub job_id: String,
    /// Title of that job when the application was made.
    pub job_title: String,
    /// Applicant's full name.
    pub applicant_name: String,
    /// Contact address.
    pub email: String,
    /// Free-form cover letter.
    pub cover_letter: String,
    /// Resume as a `data:` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_data: Option<String>,
    /// When the application was submitted.
    pub timestamp: DateTime<Utc>,
    /// Review state.
    #[serde(default)]
    pub status: ApplicationStatus,
}

impl Application {
    /// A pending application to `job`, stamped now.
    #[must_use]
    pub fn new(
        job: &Job,
        applicant_name: impl Into<String>,
        email: impl Into<String>,
        cover_letter: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            applicant_name: applicant_name.into(),
            email: email.into(),
            cover_letter: cover_letter.into(),
            resume_data: None,
            timestamp: Utc::now(),
            status: ApplicationStatus::Pending,
        }
    }
}

/// A leadership bio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    /// Identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Position, e.g. `"CEO"`.
    pub role: String,
    /// Short biography.
    pub bio: String,
    /// Portrait URL.
    pub image_url: String,
}

/// A newsroom entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Identifier.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Display date, as written by the editor.
    pub date: String,
    /// Section, e.g. `"Press Release"`.
    pub category: String,
    /// Teaser shown in listings.
    pub excerpt: String,
    /// Full article body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Header image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Identifier.
    pub id: String,
    /// Post title.
    pub title: String,
    /// Teaser shown in listings.
    pub excerpt: String,
    /// Full post body.
    pub content: String,
    /// Byline.
    pub author: String,
    /// Display date.
    pub date: String,
    /// Header image URL.
    pub image_url: String,
    /// Topic.
    pub category: String,
    /// Like count, when tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    /// Share count, when tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
}

/// A partner testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    /// Identifier.
    pub id: String,
    /// Partner company name.
    pub company: String,
    /// Testimonial text.
    pub quote: String,
    /// Logo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// A product in the systems catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier, e.g. `"02"`.
    pub id: String,
    /// Product name.
    pub title: String,
    /// Catalog category, e.g. `"Hybrid VTOL UAV"`.
    pub category: String,
    /// Marketing description.
    pub description: String,
    /// Hero image URL.
    pub image_url: String,
    /// 3D model (`.glb`) for the interactive preview.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    /// Showcase video URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Specification table.
    #[serde(default)]
    pub specs: Vec<Spec>,
    /// Feature bullets.
    #[serde(default)]
    pub features: Vec<String>,
}

/// Payload family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// EO/IR and other surveillance sensors.
    Surveillance,
    /// Survey cameras and LiDAR.
    Mapping,
}

/// A sensor payload for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    /// Identifier.
    pub id: String,
    /// The product this payload fits.
    pub product_id: String,
    /// Payload family.
    #[serde(rename = "type")]
    pub kind: PayloadKind,
    /// Payload name.
    pub title: String,
    /// Marketing description.
    pub description: String,
    /// Product shot URL.
    pub image_url: String,
    /// 3D model (`.glb`) URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    /// Specification table.
    #[serde(default)]
    pub specs: Vec<Spec>,
    /// Sensor maker, if not in-house.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

/// Lifecycle of a hackathon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HackathonStatus {
    /// Registration open.
    Upcoming,
    /// In progress.
    Ongoing,
    /// Finished.
    Completed,
}

/// A hackathon listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hackathon {
    /// Identifier.
    pub id: String,
    /// Event name.
    pub title: String,
    /// Event summary.
    pub description: String,
    /// Display date.
    pub date: String,
    /// Where it is held.
    pub venue: String,
    /// Prize pool as displayed, e.g. `"₹5,00,000"`.
    pub prize_pool: String,
    /// Lifecycle stage.
    pub status: HackathonStatus,
    /// Banner image URL.
    pub image_url: String,
    /// Eligibility rules.
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// Review state of a hackathon application. There is no "reviewed" step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HackathonApplicationStatus {
    /// Not yet looked at.
    #[default]
    Pending,
    /// Team admitted.
    Accepted,
    /// Declined.
    Rejected,
}

/// A hackathon registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HackathonApplication {
    /// Identifier.
    pub id: String,
    /// The hackathon registered for.
    pub hackathon_id: String,
    /// Title of that hackathon at registration time.
    pub hackathon_title: String,
    /// Applicant's full name.
    pub applicant_name: String,
    /// Contact address.
    pub email: String,
    /// Team name, if registering as a team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    /// GitHub profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    /// LinkedIn profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_link: Option<String>,
    /// Review state.
    #[serde(default)]
    pub status: HackathonApplicationStatus,
}

impl HackathonApplication {
    /// A pending registration for `hackathon`.
    #[must_use]
    pub fn new(
        hackathon: &Hackathon,
        applicant_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            hackathon_id: hackathon.id.clone(),
            hackathon_title: hackathon.title.clone(),
            applicant_name: applicant_name.into(),
            email: email.into(),
            team_name: None,
            github_link: None,
            linkedin_link: None,
            status: HackathonApplicationStatus::Pending,
        }
    }
}

macro_rules! impl_record {
    ($ty:ty, $collection:literal, $prefix:literal, $placement:expr, [$($field:ident),+]) => {
        impl Record for $ty {
            const COLLECTION: &'static str = $collection;
            const ID_PREFIX: &'static str = $prefix;
            const PLACEMENT: Placement = $placement;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn validate(&self) -> Result<()> {
                $(require(Self::COLLECTION, stringify!($field), &self.$field)?;)+
                Ok(())
            }
        }
    };
}

impl_record!(Job, "jobs", "job", Placement::Back, [title, department]);
impl_record!(Application, "applications", "app", Placement::Front, [applicant_name, email]);
impl_record!(Leader, "leaders", "lead", Placement::Back, [name, role]);
impl_record!(NewsItem, "news", "news", Placement::Front, [title]);
impl_record!(BlogPost, "blogs", "blog", Placement::Front, [title]);
impl_record!(Partner, "partners", "part", Placement::Back, [company]);
impl_record!(Product, "products", "sys", Placement::Back, [title]);
impl_record!(Payload, "payloads", "pl", Placement::Back, [title]);
impl_record!(Hackathon, "hackathons", "hack", Placement::Front, [title]);
impl_record!(
    HackathonApplication,
    "hackathon_applications",
    "h-app",
    Placement::Front,
    [applicant_name, email]
);

impl Reviewable for Application {
    type Status = ApplicationStatus;

    fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
    }
}

impl Reviewable for HackathonApplication {
    type Status = HackathonApplicationStatus;

    fn set_status(&mut self, status: HackathonApplicationStatus) {
        self.status = status;
    }
}
