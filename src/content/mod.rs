//! Site copy: what every section of the page says.
//!
//! Deserialized from `[site]` in the config file; anything missing falls back
//! to the default portfolio copy below.

use crate::cards::{Card, CardCollection, DuplicateCardId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub brand: String,
    pub hero: Hero,
    pub bio: Bio,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub testimonials: Vec<Testimonial>,
    pub posts: Vec<BlogPost>,
    pub contact: ContactDetails,
    pub footer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bio {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub content: String,
    pub author: String,
    pub role: String,
    pub platform: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub excerpt: String,
    pub date: chrono::NaiveDate,
    pub category: String,
    pub read_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    pub response_note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Card id derived from a title: lowercase alphanumerics joined by `-`.
pub fn slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// One card id per title. Titles that slug to the same id (`C`, `C++`) get a
/// numeric suffix; titles with no alphanumerics fall back to `card`.
pub fn card_ids<'a>(titles: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    titles
        .into_iter()
        .map(|title| {
            let mut base = slug(title);
            if base.is_empty() {
                base = "card".to_string();
            }
            let mut id = base.clone();
            let mut n = 2;
            while seen.contains(&id) {
                id = format!("{}-{}", base, n);
                n += 1;
            }
            seen.insert(id.clone());
            id
        })
        .collect()
}

impl SiteContent {
    pub fn project_cards(&self) -> Result<CardCollection, DuplicateCardId> {
        let ids = card_ids(self.projects.iter().map(|p| p.title.as_str()));
        CardCollection::new(
            self.projects
                .iter()
                .zip(ids)
                .map(|(p, id)| {
                    let mut detail = p.description.clone();
                    if let Some(url) = &p.demo_url {
                        detail.push_str(&format!("\nLive demo: {}", url));
                    }
                    if let Some(url) = &p.source_url {
                        detail.push_str(&format!("\nSource: {}", url));
                    }
                    Card::new(id, p.title.clone(), detail, p.technologies.clone())
                })
                .collect(),
        )
    }

    pub fn skill_cards(&self) -> Result<CardCollection, DuplicateCardId> {
        let ids = card_ids(self.skills.iter().map(|s| s.name.as_str()));
        CardCollection::new(
            self.skills
                .iter()
                .zip(ids)
                .map(|(s, id)| {
                    Card::new(
                        id,
                        s.name.clone(),
                        s.description.clone(),
                        [s.level.label()],
                    )
                })
                .collect(),
        )
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            brand: "Portfolio".into(),
            hero: Hero {
                title: "Building the Future of the Web".into(),
                subtitle: "Full-Stack Developer & UI/UX Enthusiast".into(),
            },
            bio: Bio {
                title: "Hi, I'm a Developer".into(),
                description: "I'm passionate about creating beautiful and functional web \
                    applications using modern technologies. With expertise in React, \
                    TypeScript, and various modern web frameworks, I strive to build \
                    seamless user experiences."
                    .into(),
            },
            skills: default_skills(),
            projects: default_projects(),
            testimonials: default_testimonials(),
            posts: default_posts(),
            contact: ContactDetails {
                email: "contact@example.com".into(),
                socials: vec![
                    SocialLink {
                        label: "GitHub".into(),
                        url: "https://github.com/".into(),
                    },
                    SocialLink {
                        label: "LinkedIn".into(),
                        url: "https://www.linkedin.com/".into(),
                    },
                ],
                response_note: "I typically respond within 24 hours during business days. \
                    For urgent inquiries, please reach out via LinkedIn."
                    .into(),
            },
            footer: "Portfolio. All rights reserved.".into(),
        }
    }
}

fn skill(name: &str, description: &str, level: SkillLevel) -> Skill {
    Skill {
        name: name.into(),
        description: description.into(),
        level,
    }
}

fn default_skills() -> Vec<Skill> {
    vec![
        skill(
            "Frontend Development",
            "Building responsive and interactive user interfaces",
            SkillLevel::Expert,
        ),
        skill(
            "Backend Development",
            "Creating scalable server-side applications",
            SkillLevel::Advanced,
        ),
        skill(
            "Database Management",
            "Designing and optimizing database structures",
            SkillLevel::Intermediate,
        ),
        skill(
            "Web Performance",
            "Optimizing web applications for speed and efficiency",
            SkillLevel::Advanced,
        ),
        skill(
            "API Development",
            "Creating and maintaining RESTful APIs",
            SkillLevel::Expert,
        ),
        skill(
            "Web Security",
            "Implementing secure web practices and protocols",
            SkillLevel::Intermediate,
        ),
    ]
}

fn default_projects() -> Vec<Project> {
    let project = |title: &str, description: &str, tech: &[&str]| Project {
        title: title.into(),
        description: description.into(),
        technologies: tech.iter().map(|t| t.to_string()).collect(),
        demo_url: None,
        source_url: None,
    };
    vec![
        project(
            "E-Commerce Platform",
            "A modern e-commerce platform built with Next.js and Stripe",
            &["Next.js", "TypeScript", "Stripe", "Tailwind CSS"],
        ),
        project(
            "AI Chat Application",
            "Real-time chat app with AI-powered responses",
            &["React", "OpenAI", "Socket.io", "Node.js"],
        ),
        project(
            "Portfolio Generator",
            "Create stunning portfolios with a few clicks",
            &["Vue.js", "Firebase", "Tailwind CSS"],
        ),
    ]
}

fn default_testimonials() -> Vec<Testimonial> {
    let testimonial = |content: &str, author: &str, role: &str, platform: &str| Testimonial {
        content: content.into(),
        author: author.into(),
        role: role.into(),
        platform: platform.into(),
    };
    vec![
        testimonial(
            "One of the most talented developers I've worked with. Delivered our project \
             ahead of schedule with exceptional quality.",
            "Sarah Johnson",
            "CEO, TechStart",
            "LinkedIn",
        ),
        testimonial(
            "Incredible attention to detail and a true professional. The web application \
             exceeded our expectations.",
            "Michael Chen",
            "Product Manager, InnovateCo",
            "Clutch",
        ),
        testimonial(
            "Outstanding work on our e-commerce platform. The UI is beautiful and the \
             performance improvements are remarkable.",
            "Emily Rodriguez",
            "CTO, ShopWave",
            "Twitter",
        ),
    ]
}

fn default_posts() -> Vec<BlogPost> {
    let post = |title: &str, excerpt: &str, (y, m, d): (i32, u32, u32), category: &str, read: &str| {
        BlogPost {
            title: title.into(),
            excerpt: excerpt.into(),
            date: chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            category: category.into(),
            read_time: read.into(),
        }
    };
    vec![
        post(
            "The Future of Web Development: What's Next?",
            "Exploring upcoming trends in web development and how they'll shape the future \
             of the internet.",
            (2024, 2, 15),
            "Technology",
            "5 min read",
        ),
        post(
            "Optimizing React Performance",
            "Learn advanced techniques for improving your React application's performance.",
            (2024, 2, 10),
            "React",
            "8 min read",
        ),
        post(
            "Building Accessible Web Applications",
            "A comprehensive guide to making your web applications accessible to everyone.",
            (2024, 2, 5),
            "Accessibility",
            "6 min read",
        ),
    ]
}
