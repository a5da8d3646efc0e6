//! Built-in content for every known section.
//!
//! These rows are what the site renders before anything has been saved, and
//! whenever storage cannot be read.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use super::SectionKey;
use crate::storage::models::SectionRecord;

/// Default row for a section key.
pub fn default_section(key: SectionKey) -> SectionRecord {
    let (title, nav_title, slug, order) = match key {
        SectionKey::Hero => ("Hero Section", Some("Home"), Some("hero"), 1),
        SectionKey::About => ("About Me", Some("About"), Some("about"), 2),
        SectionKey::Projects => ("Projects", Some("Projects"), Some("projects"), 3),
        SectionKey::Skills => ("Skills", Some("Skills"), Some("skills"), 4),
        SectionKey::Career => ("Career", Some("Career"), Some("career"), 5),
        SectionKey::Contact => ("Contact", Some("Contact"), Some("contact"), 6),
        SectionKey::SiteSettings => ("Site Settings", None, None, 99),
    };

    SectionRecord {
        key: key.as_str().to_string(),
        title: title.to_string(),
        nav_title: nav_title.map(str::to_string),
        slug: slug.map(str::to_string),
        order,
        data: default_data(key),
        updated_at: DateTime::<Utc>::default(),
    }
}

/// Default rows for all known sections, in key declaration order.
pub fn default_sections() -> Vec<SectionRecord> {
    SectionKey::ALL.iter().copied().map(default_section).collect()
}

/// Default data payload for a section key.
pub fn default_data(key: SectionKey) -> Value {
    match key {
        SectionKey::Hero => json!({
            "name": "Dominik",
            "jobTitle": "Front End & WordPress Developer",
            "backgroundVideo": "/background.mp4",
        }),
        SectionKey::About => json!({
            "profileImage": "/profile.jpg",
            "paragraph1": "\"Hello there.\" I'm Dominik, a Web Developer specializing in WordPress & Next.js. \
                Currently completing my B.Eng. in Aeronautics, I bring a distinct engineering mindset to web \
                development. I treat every project like a flight operation: prioritizing performance, stability, \
                and precise execution.",
            "paragraph2": "My focus goes beyond writing lines of code; I architect solutions that are clean, \
                maintainable, and reliable. Whether building a simple WordPress landing page or a complex, \
                scalable web app, I bridge the gap between technical logic and user experience. When I'm not \
                coding, I'm likely in the cockpit training for my ATPL or analyzing aircraft systems.",
        }),
        SectionKey::Projects => {
            let items: Vec<Value> = (1..=12)
                .map(|i| {
                    json!({
                        "id": i,
                        "title": format!("Project {i}"),
                        "description": "Short description of the project. This is a placeholder text to demonstrate the layout.",
                        "image": "/placeholder-project.jpg",
                        "demoUrl": "https://example.com",
                        "repoUrl": "https://github.com",
                        "tags": ["React", "CSS"],
                    })
                })
                .collect();

            json!({
                "featured": {
                    "title": "Featured Project",
                    "description": "This is the project I am currently working on. It features a modern tech \
                        stack and solves a real-world problem. The description highlights the key challenges and \
                        solutions implemented.",
                    "image": "/placeholder-project.jpg",
                    "demoUrl": "https://example.com",
                    "repoUrl": "https://github.com",
                    "tags": ["Next.js", "TypeScript", "Tailwind"],
                },
                "items": items,
            })
        }
        SectionKey::Skills => json!([
            {
                "category": "Frontend Development",
                "skills": ["React", "Next.js", "TypeScript", "Tailwind"],
            },
            {
                "category": "Backend Development",
                "skills": ["Node.js", "SQL", "Docker", "REST APIs"],
            },
            {
                "category": "Wordpress Development",
                "skills": ["WordPress", "WooCommerce", "Elementor", "PHP"],
            },
        ]),
        SectionKey::Career => json!([
            {
                "id": 1,
                "role": "Web Admin",
                "company": "Sentistocks | Sentimenti",
                "period": "2023 - present",
                "description": "Since 2023, I have been responsible for managing and maintaining the company \
                    website built on WordPress.",
                "technologies": ["WordPress", "WooCommerce", "Elementor", "Hosting Management", "Stripe Payment Gateway"],
            },
            {
                "id": 2,
                "role": "B.Eng. Student",
                "company": "Rzeszów University of Technology",
                "period": "2023 - present",
                "description": "Currently pursuing a Bachelor of Engineering degree in Aviation Engineering in \
                    the heart of Poland's 'Aviation Valley'.",
                "technologies": ["MATLAB", "Simulink", "AutoCAD", "Ansys"],
            },
            {
                "id": 3,
                "role": "IT Technician",
                "company": "\"Elektryk\" Krosno High School",
                "period": "2019 - 2023",
                "description": "Graduated with the IT Technician title, establishing a strong foundation in \
                    computer science.",
                "technologies": ["Network Configuration", "Database Management", "Hardware Troubleshooting"],
            },
        ]),
        SectionKey::Contact => json!({
            "description": "I'm currently open to new opportunities. Whether you have a question or just want \
                to say hi, I'll try my best to get back to you!",
            "socialLinks": [
                { "platform": "GitHub", "url": "https://github.com" },
                { "platform": "LinkedIn", "url": "https://linkedin.com" },
                { "platform": "Twitter", "url": "https://twitter.com" },
            ],
        }),
        SectionKey::SiteSettings => json!({
            "title": "Dominik Czekański 👨🏻‍💻",
            "description": "Hi, I'm Dominik and I sincerely welcome you to my website!",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::validate_data;

    #[test]
    fn every_default_payload_matches_its_model() {
        for key in SectionKey::ALL {
            let section = default_section(key);
            assert_eq!(section.key, key.as_str());
            validate_data(key, &section.data)
                .unwrap_or_else(|e| panic!("default data for {key} is invalid: {e}"));
        }
    }

    #[test]
    fn site_settings_stays_out_of_navigation() {
        let settings = default_section(SectionKey::SiteSettings);
        assert!(settings.nav_title.is_none());
        assert!(settings.slug.is_none());
        assert_eq!(settings.order, 99);
    }
}
