use askama::Template;

use crate::storage::models::SectionRecord;

#[derive(Template, Default)]
#[template(path = "admin/login.html")]
pub struct LoginPage {
    pub email: String,
    pub error: String,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardPage {
    pub user_name: String,
    pub sections: Vec<SectionRow>,
}

pub struct SectionRow {
    pub key: String,
    pub title: String,
    pub nav_title: String,
    pub slug: String,
    /// Rendered on the public page
    pub visible: bool,
}

#[derive(Template)]
#[template(path = "admin/editor.html")]
pub struct EditorPage {
    pub user_name: String,
    pub key: String,
    pub title: String,
    pub nav_title: String,
    pub slug: String,
    pub order: String,
    /// Pretty-printed JSON payload
    pub data: String,
    pub error: String,
    pub saved: bool,
}

#[derive(Template)]
#[template(path = "admin/security.html")]
pub struct SecurityPage {
    pub user_name: String,
    pub error: String,
    pub success: bool,
}

impl DashboardPage {
    pub fn new(user_name: &str, sections: &[SectionRecord]) -> Self {
        let sections = sections
            .iter()
            .map(|s| SectionRow {
                key: s.key.clone(),
                title: s.title.clone(),
                nav_title: s.nav_title.clone().unwrap_or_default(),
                slug: s.slug.clone().unwrap_or_default(),
                visible: s.slug.is_some(),
            })
            .collect();

        DashboardPage {
            user_name: user_name.to_string(),
            sections,
        }
    }
}

impl EditorPage {
    pub fn new(user_name: &str, section: &SectionRecord) -> Self {
        EditorPage {
            user_name: user_name.to_string(),
            key: section.key.clone(),
            title: section.title.clone(),
            nav_title: section.nav_title.clone().unwrap_or_default(),
            slug: section.slug.clone().unwrap_or_default(),
            order: section.order.to_string(),
            data: serde_json::to_string_pretty(&section.data).unwrap_or_default(),
            error: String::new(),
            saved: false,
        }
    }
}

impl SecurityPage {
    pub fn new(user_name: &str) -> Self {
        SecurityPage {
            user_name: user_name.to_string(),
            error: String::new(),
            success: false,
        }
    }
}
