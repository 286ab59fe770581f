//! HTML rendering for the single-page portfolio.
//!
//! Every value that did not originate in this file passes through
//! `escape_html`, including repository data and stored overrides.

use crate::models::notice::{Notice, NoticeVariant};
use crate::projects::gallery::ProjectCard;
use crate::projects::service::ProjectsView;
use crate::site::content::{
    EXPERIENCE, LANDING_TAGLINE, LANDING_TITLE, NAV_LINKS, OWNER_INITIALS, OWNER_NAME, SKILLS,
    SOCIAL_LINKS,
};

/// Inputs for one page render.
pub struct PageModel<'a> {
    pub avatar_url: &'a str,
    pub projects: &'a ProjectsView,
    pub year: i32,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Only absolute http(s) URLs become links; anything else (`javascript:`,
/// `data:`, relative paths) is dropped.
fn is_web_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    url.starts_with("https://") || url.starts_with("http://")
}

fn external_link(url: &str, label: &str) -> String {
    if !is_web_url(url) {
        return String::new();
    }
    format!(
        r#"<a class="button outline" href="{}" target="_blank" rel="noopener noreferrer">{label}</a>"#,
        escape_html(url.trim())
    )
}

pub fn render_page(model: &PageModel<'_>) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {owner}</title>
<link rel="stylesheet" href="/static/site.css">
</head>
<body>
"#,
        title = escape_html(LANDING_TITLE),
        owner = escape_html(OWNER_NAME),
    ));

    html.push_str(&render_header());
    html.push_str("<main>\n");
    html.push_str(&render_landing(model.avatar_url));
    html.push_str(&render_about());
    html.push_str(&render_skills());
    html.push_str(&render_projects(model.projects));
    html.push_str(&render_contact());
    html.push_str("</main>\n");
    html.push_str(&render_footer(model.year));
    html.push_str(
        r#"<div id="toaster" aria-live="polite"></div>
<script src="/static/site.js" defer></script>
</body>
</html>
"#,
    );
    html
}

fn render_header() -> String {
    let links: String = NAV_LINKS
        .iter()
        .map(|l| format!(r#"<a href="{}">{}</a>"#, l.href, escape_html(l.label)))
        .collect();
    format!(
        r#"<header class="site-header">
  <a class="brand" href="/">{owner}</a>
  <nav>{links}</nav>
</header>
"#,
        owner = escape_html(OWNER_NAME),
    )
}

fn render_landing(avatar_url: &str) -> String {
    format!(
        r##"<section id="home" class="landing">
  <div class="intro">
    <h1>{title}</h1>
    <p>{tagline}</p>
    <a class="button accent" href="#projects">View My Work</a>
    <a class="button outline" href="#contact">Get in Touch</a>
  </div>
  <div class="avatar">
    <img id="avatar-image" src="{avatar}" alt="Developer Avatar" width="128" height="128">
    <button type="button" data-open="avatar-dialog">Generate Avatar</button>
    <dialog id="avatar-dialog">
      <form id="avatar-generate-form" method="dialog">
        <h3>Generate AI Avatar</h3>
        <p>Describe your desired avatar. You can also upload a photo to use as a reference.</p>
        <label for="avatar-reference">Reference Picture (Optional)</label>
        <input id="avatar-reference" name="reference" type="file" accept="image/*">
        <label for="avatar-description">Description</label>
        <textarea id="avatar-description" name="description" rows="4"
          placeholder="e.g., A pixel art cat wearing sunglasses, in a vibrant synthwave style"></textarea>
        <button type="submit" value="generate">Generate</button>
      </form>
      <form id="avatar-upload-form">
        <label for="avatar-upload">Or upload your own</label>
        <input id="avatar-upload" name="file" type="file" accept="image/*">
      </form>
      <button type="button" id="avatar-reset">Reset to placeholder</button>
      <button type="button" data-close="avatar-dialog">Close</button>
    </dialog>
    <span class="fallback" aria-hidden="true">{initials}</span>
  </div>
</section>
"##,
        title = escape_html(LANDING_TITLE),
        tagline = escape_html(LANDING_TAGLINE),
        avatar = escape_html(avatar_url),
        initials = escape_html(OWNER_INITIALS),
    )
}

fn render_about() -> String {
    let cards: String = EXPERIENCE
        .iter()
        .enumerate()
        .map(|(i, exp)| {
            format!(
                r#"<article class="card fade-in" style="animation-delay: {delay}ms">
      <header><h3>{role}</h3><span>{company}</span><time>{duration}</time></header>
      <p>{description}</p>
    </article>
"#,
                delay = i * 150,
                role = escape_html(exp.role),
                company = escape_html(exp.company),
                duration = escape_html(exp.duration),
                description = escape_html(exp.description),
            )
        })
        .collect();

    format!(
        r#"<section id="about" class="secondary">
  <span class="badge">Experience</span>
  <h2>My Professional Journey</h2>
  <p>I thrive on building elegant solutions to complex problems. Here's a look at my journey so far.</p>
  <div class="timeline">
    {cards}  </div>
</section>
"#
    )
}

fn render_skills() -> String {
    let cards: String = SKILLS
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            format!(
                r#"<article class="card skill fade-in" style="animation-delay: {delay}ms" data-icon="{icon}">
      <h3>{name}</h3>
      <progress max="100" value="{level}">{level}%</progress>
      <p>{level}% Proficient</p>
    </article>
"#,
                delay = i * 100,
                icon = skill.icon,
                name = escape_html(skill.name),
                level = skill.level,
            )
        })
        .collect();

    format!(
        r#"<section id="skills">
  <span class="badge">Skills</span>
  <h2>Technologies I Use</h2>
  <p>I have experience with a wide range of technologies for building modern web applications.</p>
  <div class="grid">
    {cards}  </div>
</section>
"#
    )
}

fn render_project_card(index: usize, card: &ProjectCard) -> String {
    let language = card
        .language
        .as_deref()
        .map(|l| format!(r#"<span class="badge secondary">{}</span>"#, escape_html(l)))
        .unwrap_or_default();
    let homepage = card
        .homepage
        .as_deref()
        .map(|h| external_link(h, "Live"))
        .unwrap_or_default();

    format!(
        r#"<article class="card project fade-in shine" style="animation-delay: {delay}ms" data-repo-id="{id}">
      <img src="{image}" alt="{name}" width="600" height="400">
      <h3>{name}</h3>
      {language}
      <p>{description}</p>
      <footer>
        {github}
        {homepage}
      </footer>
    </article>
"#,
        delay = index * 150,
        id = card.id,
        image = escape_html(&card.image_url),
        name = escape_html(&card.name),
        description = escape_html(&card.description),
        github = external_link(&card.html_url, "GitHub"),
    )
}

fn render_manage_dialog(view: &ProjectsView) -> String {
    let repo_list: String = if view.repos.is_empty() {
        r#"<p class="muted">No repositories found for this user.</p>"#.to_string()
    } else {
        view.repos
            .iter()
            .map(|repo| {
                format!(
                    r#"<label><input type="checkbox" data-toggle-repo="{id}"{checked}> {name}</label>
"#,
                    id = repo.id,
                    checked = if view.selected_repo_ids.contains(&repo.id) {
                        " checked"
                    } else {
                        ""
                    },
                    name = escape_html(&repo.name),
                )
            })
            .collect()
    };

    let selected: Vec<_> = view
        .repos
        .iter()
        .filter(|r| view.selected_repo_ids.contains(&r.id))
        .collect();
    let editors: String = if selected.is_empty() {
        r#"<p class="muted">Select a repository to upload an image.</p>"#.to_string()
    } else {
        selected
            .iter()
            .map(|repo| {
                let description = view
                    .project_descriptions
                    .get(&repo.id)
                    .map(String::as_str)
                    .unwrap_or_default();
                let remove = if view.project_images.contains_key(&repo.id) {
                    format!(
                        r#"<button type="button" data-remove-image="{}">Remove image</button>"#,
                        repo.id
                    )
                } else {
                    String::new()
                };
                format!(
                    r#"<fieldset data-repo-id="{id}" data-repo-name="{name}" data-repo-language="{language}">
        <legend>{name}</legend>
        <input type="file" accept="image/*" data-upload-image="{id}">
        {remove}
        <textarea data-description="{id}" rows="3">{description}</textarea>
        <button type="button" data-generate-description="{id}">Generate</button>
        <button type="button" data-save-description="{id}">Save</button>
      </fieldset>
"#,
                    id = repo.id,
                    name = escape_html(&repo.name),
                    language = escape_html(repo.language.as_deref().unwrap_or_default()),
                    description = escape_html(description),
                )
            })
            .collect()
    };

    format!(
        r#"<button type="button" class="manage" data-open="manage-projects" aria-label="Manage Projects">Manage</button>
  <dialog id="manage-projects">
    <h3>Manage Projects</h3>
    <p>Select repositories to display and upload a custom image for each project.</p>
    <form id="username-form">
      <label for="github-username">GitHub Username</label>
      <input id="github-username" name="username" value="{username}" placeholder="e.g., gauri-garg">
      <button type="submit">Refresh Repositories</button>
    </form>
    <div class="repo-list">
      {repo_list}    </div>
    <div class="repo-editors">
      {editors}    </div>
    <button type="button" data-close="manage-projects" data-reload>Done</button>
  </dialog>
"#,
        username = escape_html(&view.github_username),
    )
}

fn render_projects(view: &ProjectsView) -> String {
    let body = if !view.gallery.is_empty() {
        let cards: String = view
            .gallery
            .iter()
            .enumerate()
            .map(|(i, card)| render_project_card(i, card))
            .collect();
        format!(r#"<div class="grid">{cards}</div>"#)
    } else if view.github_username.is_empty() {
        r#"<div class="empty"><p>No GitHub username provided.</p><p>Click the settings icon to add your username and see your projects.</p></div>"#.to_string()
    } else {
        r#"<div class="empty"><p>No projects selected.</p><p>Click the settings icon to add projects from GitHub.</p></div>"#.to_string()
    };

    format!(
        r#"<section id="projects" class="secondary">
  <span class="badge accent">Projects</span>
  <h2>My Recent Work</h2>
  <p>Here are some of the projects I've chosen to feature from my GitHub profile.</p>
  {dialog}
  {notice}
  {body}
</section>
"#,
        dialog = render_manage_dialog(view),
        notice = view.notice.as_ref().map(render_notice).unwrap_or_default(),
    )
}

/// Notices rendered server side are picked up by the page script and shown as toasts.
fn render_notice(notice: &Notice) -> String {
    let variant = match notice.variant {
        NoticeVariant::Default => "default",
        NoticeVariant::Destructive => "destructive",
    };
    format!(
        r#"<template class="pending-notice" data-variant="{variant}" data-title="{title}" data-description="{description}"></template>"#,
        title = escape_html(&notice.title),
        description = escape_html(&notice.description),
    )
}

fn render_contact() -> String {
    let socials: String = SOCIAL_LINKS
        .iter()
        .map(|s| {
            format!(
                r#"<a class="button outline" href="{url}" target="_blank" rel="noopener noreferrer">{name}</a>"#,
                url = escape_html(s.url),
                name = escape_html(s.name),
            )
        })
        .collect();

    format!(
        r#"<section id="contact">
  <div>
    <span class="badge">Contact</span>
    <h2>Get in Touch</h2>
    <p>Have a project in mind, a question, or just want to say hi? My inbox is always open.</p>
    <h3>Find me on social media</h3>
    <div class="socials">{socials}</div>
  </div>
  <form id="contact-form" novalidate>
    <label for="contact-name">Name</label>
    <input id="contact-name" name="name" required minlength="2" placeholder="Your Name">
    <small class="field-error" data-error-for="name"></small>
    <label for="contact-email">Email</label>
    <input id="contact-email" name="email" type="email" required placeholder="your.email@example.com">
    <small class="field-error" data-error-for="email"></small>
    <label for="contact-message">Message</label>
    <textarea id="contact-message" name="message" required minlength="10" placeholder="Tell me how I can help you"></textarea>
    <small class="field-error" data-error-for="message"></small>
    <button type="submit" class="button accent">Send Message</button>
  </form>
</section>
"#
    )
}

fn render_footer(year: i32) -> String {
    format!(
        r#"<footer class="site-footer">
  <span class="brand">{owner}</span>
  <p>&copy; {year} {owner}. All rights reserved.</p>
</footer>
"#,
        owner = escape_html(OWNER_NAME),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::preferences::{ProjectPreferences, AVATAR_PLACEHOLDER_URL};
    use crate::models::repository::Repository;
    use crate::projects::gallery::build_gallery;
    use crate::test_support::{repo, repo_with_description};
    use std::collections::{BTreeMap, BTreeSet};

    fn view(username: &str, prefs: ProjectPreferences, repos: Vec<Repository>) -> ProjectsView {
        ProjectsView {
            github_username: username.to_string(),
            gallery: build_gallery(&repos, &prefs),
            repos,
            selected_repo_ids: prefs.selected_repo_ids,
            project_images: prefs.project_images,
            project_descriptions: prefs.project_descriptions,
            notice: None,
        }
    }

    fn render(view: &ProjectsView) -> String {
        render_page(&PageModel {
            avatar_url: AVATAR_PLACEHOLDER_URL,
            projects: view,
            year: 2026,
        })
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_page_contains_every_section() {
        let html = render(&view("", ProjectPreferences::default(), vec![]));
        for id in ["home", "about", "skills", "projects", "contact"] {
            assert!(html.contains(&format!(r#"<section id="{id}""#)), "missing {id}");
        }
        assert!(html.contains("&copy; 2026 Gauri Garg"));
        assert!(html.contains("95% Proficient"));
        assert!(html.contains("Innovate Co."));
    }

    #[test]
    fn test_empty_state_without_username() {
        let html = render(&view("", ProjectPreferences::default(), vec![]));
        assert!(html.contains("No GitHub username provided."));
    }

    #[test]
    fn test_empty_state_with_username_but_no_selection() {
        let prefs = ProjectPreferences::default();
        let html = render(&view("octocat", prefs, vec![repo(1, "alpha")]));
        assert!(html.contains("No projects selected."));
    }

    #[test]
    fn test_gallery_cards_render_and_escape_remote_text() {
        let prefs = ProjectPreferences {
            selected_repo_ids: BTreeSet::from([1]),
            project_descriptions: BTreeMap::new(),
            ..Default::default()
        };
        let repos = vec![repo_with_description(
            1,
            "xss",
            "<script>alert('x')</script>",
        )];
        let html = render(&view("octocat", prefs, repos));
        assert!(html.contains(r#"data-repo-id="1""#));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_web_url_schemes() {
        assert!(is_web_url("https://example.com"));
        assert!(is_web_url(" HTTP://example.com/x "));
        assert!(!is_web_url("javascript:alert(1)"));
        assert!(!is_web_url("data:text/html,hi"));
        assert!(!is_web_url("/relative"));
    }

    #[test]
    fn test_script_scheme_links_are_not_rendered() {
        let prefs = ProjectPreferences {
            selected_repo_ids: BTreeSet::from([1, 2]),
            ..Default::default()
        };
        let mut hostile = repo(1, "hostile");
        hostile.homepage = Some("javascript:alert(document.cookie)".to_string());
        hostile.html_url = "JavaScript:alert(1)".to_string();
        let mut safe = repo(2, "safe");
        safe.homepage = Some("https://safe.example.com".to_string());

        let html = render(&view("octocat", prefs, vec![hostile, safe]));
        assert!(!html.to_ascii_lowercase().contains("javascript:"));
        assert!(html.contains(r#"href="https://safe.example.com""#));
        assert!(html.contains(r#"href="https://github.com/octocat/safe""#));
    }

    #[test]
    fn test_checkboxes_reflect_selection() {
        let prefs = ProjectPreferences {
            selected_repo_ids: BTreeSet::from([2]),
            ..Default::default()
        };
        let html = render(&view("octocat", prefs, vec![repo(1, "a"), repo(2, "b")]));
        assert!(html.contains(r#"data-toggle-repo="1"> a"#));
        assert!(html.contains(r#"data-toggle-repo="2" checked> b"#));
    }

    #[test]
    fn test_notice_is_embedded_for_the_script() {
        let mut v = view("octocat", ProjectPreferences::default(), vec![]);
        v.notice = Some(Notice::failure("Error fetching projects", "Check the username"));
        let html = render(&v);
        assert!(html.contains(r#"data-variant="destructive""#));
        assert!(html.contains(r#"data-title="Error fetching projects""#));
    }

    #[test]
    fn test_contact_form_carries_client_constraints() {
        let html = render(&view("", ProjectPreferences::default(), vec![]));
        assert!(html.contains(r#"name="name" required minlength="2""#));
        assert!(html.contains(r#"type="email""#));
        assert!(html.contains(r#"name="message" required minlength="10""#));
    }
}
