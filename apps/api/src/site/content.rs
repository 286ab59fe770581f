//! Hardcoded copy for the static sections of the page.

pub const OWNER_NAME: &str = "Gauri Garg";
pub const OWNER_INITIALS: &str = "GG";

pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        href: "#about",
        label: "About",
    },
    NavLink {
        href: "#skills",
        label: "Skills",
    },
    NavLink {
        href: "#projects",
        label: "Projects",
    },
    NavLink {
        href: "#contact",
        label: "Contact",
    },
];

pub const LANDING_TITLE: &str = "Devfolio Animator";
pub const LANDING_TAGLINE: &str = "A creative developer crafting beautiful and functional web \
    experiences. Welcome to my animated portfolio.";

pub struct Experience {
    pub role: &'static str,
    pub company: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
}

pub const EXPERIENCE: &[Experience] = &[
    Experience {
        role: "Creative Developer",
        company: "Freelance",
        duration: "2021 - Present",
        description: "Building beautiful and functional web experiences for a variety of clients. \
            Specializing in React, Next.js, and crafting engaging user interfaces.",
    },
    Experience {
        role: "Web Developer",
        company: "Innovate Co.",
        duration: "2019 - 2021",
        description: "Developed and maintained web applications, working across the full stack \
            with technologies like Node.js and Vue.js. Contributed to API design and third-party \
            service integrations.",
    },
    Experience {
        role: "Web Development Intern",
        company: "Startup Hub",
        duration: "2018 - 2019",
        description: "Gained foundational experience in web development, contributing to projects \
            from conception to deployment using HTML, CSS, JavaScript, and PHP.",
    },
];

pub struct Skill {
    pub name: &'static str,
    /// Proficiency, 0-100.
    pub level: u8,
    pub icon: &'static str,
}

pub const SKILLS: &[Skill] = &[
    Skill {
        name: "React & Next.js",
        level: 95,
        icon: "codepen",
    },
    Skill {
        name: "TypeScript",
        level: 90,
        icon: "component",
    },
    Skill {
        name: "Node.js & Express",
        level: 85,
        icon: "server",
    },
    Skill {
        name: "SQL & NoSQL",
        level: 80,
        icon: "database",
    },
    Skill {
        name: "Cloud Services (GCP/AWS)",
        level: 75,
        icon: "cloud",
    },
    Skill {
        name: "Mobile Development",
        level: 70,
        icon: "smartphone",
    },
];

pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        name: "GitHub",
        url: "https://github.com",
    },
    SocialLink {
        name: "LinkedIn",
        url: "https://www.linkedin.com/in/gauri-garg-582011290",
    },
];
