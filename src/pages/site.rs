use askama::Template;
use chrono::{DateTime, Utc};

use crate::content::models::{
    AboutData, CareerEntry, ContactData, HeroData, Project, ProjectsData, SkillCategory,
    SocialLink,
};
use crate::content::text::{strip_tags, truncate_words};
use crate::content::{default_data, SectionData, SectionKey};
use crate::storage::models::SectionRecord;

/// Word limit for the featured project's summary
pub const FEATURED_WORD_LIMIT: usize = 50;
/// Word limit for summaries in the project grid
pub const GRID_WORD_LIMIT: usize = 25;

const DEFAULT_TITLE: &str = "Portfolio";

// ============================================================================
// Templates
// ============================================================================

#[derive(Template)]
#[template(path = "site/index.html")]
pub struct HomePage {
    pub title: String,
    pub description: String,
    pub nav: Vec<NavLink>,
    pub sections: Vec<RenderedSection>,
    pub footer_name: String,
    pub year: i32,
}

pub struct NavLink {
    pub title: String,
    pub slug: String,
}

pub struct RenderedSection {
    pub key: &'static str,
    pub html: String,
}

#[derive(Template)]
#[template(path = "site/hero.html")]
struct HeroSection<'a> {
    slug: &'a str,
    name: &'a str,
    job_title: &'a str,
    background_video: &'a str,
}

#[derive(Template)]
#[template(path = "site/about.html")]
struct AboutSection<'a> {
    slug: &'a str,
    heading: String,
    title: &'a str,
    profile_image: &'a str,
    paragraph1: &'a str,
    paragraph2: &'a str,
}

#[derive(Template)]
#[template(path = "site/projects.html")]
struct ProjectsSection<'a> {
    slug: &'a str,
    heading: String,
    title: &'a str,
    /// Zero or one card
    featured: Vec<ProjectCard>,
    grid: Vec<ProjectCard>,
}

struct ProjectCard {
    title: String,
    summary: String,
    full_text: String,
    truncated: bool,
    image: String,
    demo_url: String,
    repo_url: String,
    tags: Vec<String>,
}

#[derive(Template)]
#[template(path = "site/skills.html")]
struct SkillsSection<'a> {
    slug: &'a str,
    heading: String,
    title: &'a str,
    categories: &'a [SkillCategory],
}

#[derive(Template)]
#[template(path = "site/career.html")]
struct CareerSection<'a> {
    slug: &'a str,
    heading: String,
    title: &'a str,
    entries: &'a [CareerEntry],
}

#[derive(Template)]
#[template(path = "site/contact.html")]
struct ContactSection<'a> {
    slug: &'a str,
    heading: String,
    title: &'a str,
    description: &'a str,
    social_links: &'a [SocialLink],
}

// ============================================================================
// Page assembly
// ============================================================================

impl HomePage {
    /// Build the home page from sections already in display order.
    ///
    /// Only sections with a slug are rendered. The hero is never numbered;
    /// every other rendered section gets `#1`, `#2`, ... by position.
    pub fn from_sections(sections: &[SectionRecord], year: i32) -> Result<Self, askama::Error> {
        let mut title = DEFAULT_TITLE.to_string();
        let mut description = String::new();
        let mut footer_name = String::new();

        // Settings and the footer name come from their sections even when
        // those sections are not rendered
        for section in sections {
            match decode(section) {
                Some((_, SectionData::SiteSettings(settings))) => {
                    title = settings.title;
                    description = settings.description;
                }
                Some((_, SectionData::Hero(hero))) => footer_name = hero.name,
                _ => {}
            }
        }

        let nav = sections
            .iter()
            .filter_map(|s| match (&s.nav_title, &s.slug) {
                (Some(title), Some(slug)) => Some(NavLink {
                    title: title.clone(),
                    slug: slug.clone(),
                }),
                _ => None,
            })
            .collect();

        let mut rendered = Vec::new();
        let mut number = 0;
        for section in sections {
            let Some(slug) = section.slug.as_deref() else {
                continue;
            };
            let Some((key, data)) = decode(section) else {
                continue;
            };
            if key == SectionKey::SiteSettings {
                continue;
            }

            let heading = if key == SectionKey::Hero {
                String::new()
            } else {
                number += 1;
                format!("#{number}")
            };

            let html = render_section(slug, heading, &section.title, data)?;
            rendered.push(RenderedSection {
                key: key.as_str(),
                html,
            });
        }

        Ok(HomePage {
            title,
            description,
            nav,
            sections: rendered,
            footer_name,
            year,
        })
    }
}

/// Decode a section's payload, falling back to the built-in data when the
/// stored payload no longer fits its model.
fn decode(section: &SectionRecord) -> Option<(SectionKey, SectionData)> {
    let key: SectionKey = section.key.parse().ok()?;
    match SectionData::parse(key, &section.data) {
        Ok(data) => Some((key, data)),
        Err(e) => {
            tracing::warn!(section = %key, error = %e, "Stored section data is malformed, rendering default");
            SectionData::parse(key, &default_data(key)).ok().map(|d| (key, d))
        }
    }
}

fn render_section(
    slug: &str,
    heading: String,
    title: &str,
    data: SectionData,
) -> Result<String, askama::Error> {
    match data {
        SectionData::Hero(HeroData {
            name,
            job_title,
            background_video,
        }) => HeroSection {
            slug,
            name: &name,
            job_title: &job_title,
            background_video: background_video.as_deref().unwrap_or_default(),
        }
        .render(),
        SectionData::About(AboutData {
            profile_image,
            paragraph1,
            paragraph2,
        }) => AboutSection {
            slug,
            heading,
            title,
            profile_image: profile_image.as_deref().unwrap_or_default(),
            paragraph1: &paragraph1,
            paragraph2: &paragraph2,
        }
        .render(),
        SectionData::Projects(projects) => {
            let (featured, grid) = project_cards(projects);
            ProjectsSection {
                slug,
                heading,
                title,
                featured,
                grid,
            }
            .render()
        }
        SectionData::Skills(categories) => SkillsSection {
            slug,
            heading,
            title,
            categories: &categories,
        }
        .render(),
        SectionData::Career(entries) => CareerSection {
            slug,
            heading,
            title,
            entries: &entries,
        }
        .render(),
        SectionData::Contact(ContactData {
            description,
            social_links,
        }) => ContactSection {
            slug,
            heading,
            title,
            description: &description,
            social_links: &social_links,
        }
        .render(),
        SectionData::SiteSettings(_) => Ok(String::new()),
    }
}

/// Split projects into the featured card and the grid. Without an explicit
/// featured project the first item takes that place.
fn project_cards(projects: ProjectsData) -> (Vec<ProjectCard>, Vec<ProjectCard>) {
    let mut items = projects.items.into_iter();
    let featured = projects.featured.or_else(|| items.next());

    let featured = featured
        .map(|p| project_card(p, FEATURED_WORD_LIMIT))
        .into_iter()
        .collect();
    let grid = items.map(|p| project_card(p, GRID_WORD_LIMIT)).collect();
    (featured, grid)
}

fn project_card(project: Project, word_limit: usize) -> ProjectCard {
    let (summary, truncated) = truncate_words(&project.description, word_limit);
    ProjectCard {
        title: project.title,
        full_text: strip_tags(&project.description),
        summary,
        truncated,
        image: project.image.unwrap_or_default(),
        demo_url: project.demo_url.unwrap_or_default(),
        repo_url: project.repo_url.unwrap_or_default(),
        tags: project.tags,
    }
}

// ============================================================================
// Crawler files
// ============================================================================

pub fn robots_txt(site_url: &str) -> String {
    let base = site_url.trim_end_matches('/');
    format!("User-agent: *\nAllow: /\nDisallow: /admin/\nDisallow: /api/\n\nSitemap: {base}/sitemap.xml\n")
}

pub fn sitemap_xml(site_url: &str, last_modified: DateTime<Utc>) -> String {
    let base = site_url.trim_end_matches('/').replace('&', "&amp;");
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
            "  <url>\n",
            "    <loc>{}</loc>\n",
            "    <lastmod>{}</lastmod>\n",
            "    <changefreq>monthly</changefreq>\n",
            "    <priority>1</priority>\n",
            "  </url>\n",
            "</urlset>\n"
        ),
        base,
        last_modified.format("%Y-%m-%d"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_sections;
    use serde_json::json;

    #[test]
    fn renders_default_sections_in_order() {
        let page = HomePage::from_sections(&default_sections(), 2026).unwrap();

        let keys: Vec<&str> = page.sections.iter().map(|s| s.key).collect();
        assert_eq!(keys, ["hero", "about", "projects", "skills", "career", "contact"]);
        assert_eq!(page.nav.len(), 6);
        assert_eq!(page.nav[0].slug, "hero");
    }

    #[test]
    fn numbers_sections_after_the_hero() {
        let page = HomePage::from_sections(&default_sections(), 2026).unwrap();

        assert!(!page.sections[0].html.contains("#1"));
        assert!(page.sections[1].html.contains("#1"));
        assert!(page.sections[5].html.contains("#5"));
    }

    #[test]
    fn site_settings_supply_title_and_description() {
        let mut sections = default_sections();
        let settings = sections.iter_mut().find(|s| s.key == "siteSettings").unwrap();
        settings.data = json!({ "title": "Jane Doe", "description": "Engineer" });

        let page = HomePage::from_sections(&sections, 2026).unwrap();
        assert_eq!(page.title, "Jane Doe");
        assert_eq!(page.description, "Engineer");
        let html = page.render().unwrap();
        assert!(html.contains("<title>Jane Doe</title>"));
    }

    #[test]
    fn sections_without_slug_are_hidden_from_page_and_nav() {
        let mut sections = default_sections();
        let skills = sections.iter_mut().find(|s| s.key == "skills").unwrap();
        skills.slug = None;
        skills.nav_title = None;

        let page = HomePage::from_sections(&sections, 2026).unwrap();
        assert!(page.sections.iter().all(|s| s.key != "skills"));
        assert!(page.nav.iter().all(|n| n.title != "Skills"));
        // Career moves up to #3
        let career = page.sections.iter().find(|s| s.key == "career").unwrap();
        assert!(career.html.contains("#3"));
    }

    #[test]
    fn malformed_data_renders_the_default() {
        let mut sections = default_sections();
        let hero = sections.iter_mut().find(|s| s.key == "hero").unwrap();
        hero.data = json!({ "unexpected": true });

        let page = HomePage::from_sections(&sections, 2026).unwrap();
        let default_name = default_data(SectionKey::Hero)["name"].as_str().unwrap().to_string();
        assert_eq!(page.footer_name, default_name);
        assert!(page.sections[0].html.contains(&default_name));
    }

    #[test]
    fn project_descriptions_are_truncated() {
        let long = vec!["word"; 60].join(" ");
        let projects = ProjectsData {
            featured: None,
            items: vec![
                Project {
                    id: None,
                    title: "First".into(),
                    description: format!("<p>{long}</p>"),
                    image: None,
                    demo_url: None,
                    repo_url: None,
                    tags: vec![],
                },
                Project {
                    id: None,
                    title: "Second".into(),
                    description: long.clone(),
                    image: None,
                    demo_url: None,
                    repo_url: None,
                    tags: vec!["rust".into()],
                },
            ],
        };

        let (featured, grid) = project_cards(projects);
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].title, "First");
        assert!(featured[0].truncated);
        assert_eq!(featured[0].summary.split_whitespace().count(), FEATURED_WORD_LIMIT);
        assert!(!featured[0].full_text.contains("<p>"));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].summary.split_whitespace().count(), GRID_WORD_LIMIT);
    }

    #[test]
    fn user_text_is_escaped() {
        let mut sections = default_sections();
        let hero = sections.iter_mut().find(|s| s.key == "hero").unwrap();
        hero.data = json!({ "name": "<script>x</script>", "jobTitle": "Dev" });

        let page = HomePage::from_sections(&sections, 2026).unwrap();
        assert!(!page.sections[0].html.contains("<script>"));
    }

    #[test]
    fn about_and_career_text_is_escaped() {
        let mut sections = default_sections();
        let about = sections.iter_mut().find(|s| s.key == "about").unwrap();
        about.data = json!({
            "paragraph1": "<script>alert(1)</script>",
            "paragraph2": "<img src=x onerror=alert(1)>"
        });
        let career = sections.iter_mut().find(|s| s.key == "career").unwrap();
        career.data = json!([{
            "role": "Dev",
            "company": "Acme",
            "period": "2024",
            "description": "<script>alert(2)</script>"
        }]);

        let html = HomePage::from_sections(&sections, 2026).unwrap().render().unwrap();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;script&gt;alert(1)"));
        assert!(html.contains("&lt;script&gt;alert(2)"));
    }

    #[test]
    fn robots_blocks_admin_and_api() {
        let robots = robots_txt("https://example.com/");
        assert!(robots.contains("Disallow: /admin/"));
        assert!(robots.contains("Disallow: /api/"));
        assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));
    }

    #[test]
    fn sitemap_lists_site_url() {
        let xml = sitemap_xml("https://example.com", DateTime::<Utc>::default());
        assert!(xml.contains("<loc>https://example.com</loc>"));
        assert!(xml.contains("<lastmod>1970-01-01</lastmod>"));
    }
}
