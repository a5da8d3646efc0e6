use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SectionKey;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroData {
    pub name: String,
    pub job_title: String,
    #[serde(default)]
    pub background_video: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutData {
    #[serde(default)]
    pub profile_image: Option<String>,
    pub paragraph1: String,
    pub paragraph2: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: Option<Value>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsData {
    #[serde(default)]
    pub featured: Option<Project>,
    #[serde(default)]
    pub items: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerEntry {
    #[serde(default)]
    pub id: Option<Value>,
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactData {
    pub description: String,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    pub title: String,
    pub description: String,
}

/// A section payload decoded into the model for its key.
#[derive(Debug, Clone)]
pub enum SectionData {
    Hero(HeroData),
    About(AboutData),
    Projects(ProjectsData),
    Skills(Vec<SkillCategory>),
    Career(Vec<CareerEntry>),
    Contact(ContactData),
    SiteSettings(SiteSettings),
}

impl SectionData {
    /// Decode a raw payload according to the section key.
    pub fn parse(key: SectionKey, data: &Value) -> Result<Self, serde_json::Error> {
        // Value -> T goes through a clone; payloads are small
        let data = data.clone();
        Ok(match key {
            SectionKey::Hero => SectionData::Hero(serde_json::from_value(data)?),
            SectionKey::About => SectionData::About(serde_json::from_value(data)?),
            SectionKey::Projects => SectionData::Projects(serde_json::from_value(data)?),
            SectionKey::Skills => SectionData::Skills(serde_json::from_value(data)?),
            SectionKey::Career => SectionData::Career(serde_json::from_value(data)?),
            SectionKey::Contact => SectionData::Contact(serde_json::from_value(data)?),
            SectionKey::SiteSettings => SectionData::SiteSettings(serde_json::from_value(data)?),
        })
    }
}

/// Check that a payload fits the model for its key. Extra fields are allowed.
pub fn validate_data(key: SectionKey, data: &Value) -> Result<(), serde_json::Error> {
    SectionData::parse(key, data).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hero_requires_name_and_job_title() {
        let ok = json!({ "name": "Ada", "jobTitle": "Engineer" });
        assert!(validate_data(SectionKey::Hero, &ok).is_ok());

        let missing = json!({ "name": "Ada" });
        let err = validate_data(SectionKey::Hero, &missing).unwrap_err();
        assert!(err.to_string().contains("jobTitle"));
    }

    #[test]
    fn skills_must_be_a_list() {
        let object = json!({ "category": "Backend" });
        assert!(validate_data(SectionKey::Skills, &object).is_err());

        let list = json!([{ "category": "Backend", "skills": ["Rust"] }]);
        assert!(validate_data(SectionKey::Skills, &list).is_ok());
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let data = json!({
            "description": "Say hi",
            "socialLinks": [],
            "_meta": { "title": "Reach me" },
        });
        assert!(validate_data(SectionKey::Contact, &data).is_ok());
    }

    #[test]
    fn projects_accept_missing_featured() {
        let data = json!({ "items": [{ "title": "A", "description": "B" }] });
        match SectionData::parse(SectionKey::Projects, &data).unwrap() {
            SectionData::Projects(projects) => {
                assert!(projects.featured.is_none());
                assert_eq!(projects.items.len(), 1);
                assert!(projects.items[0].tags.is_empty());
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
