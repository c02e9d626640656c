//! Static portfolio content: everything the page displays.
//!
//! Pure data; the view layer decides how it is laid out.

use super::search::SearchEntry;

/// Navigation links in document order: `(title, href)`.
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("Home", "#home"),
    ("Skills", "#skills"),
    ("Education", "#education"),
    ("About", "#about"),
    ("Contact", "#contact"),
];

pub struct Profile {
    pub name: &'static str,
    pub brand: &'static str,
    pub role: &'static str,
    pub bio: &'static [&'static str],
    pub socials: &'static [(&'static str, &'static str)],
}

pub const PROFILE: Profile = Profile {
    name: "Rajan Prakash Chand",
    brand: "Rajan",
    role: "SOFTWARE ENGINEER",
    bio: &[
        "A software engineer driven by curiosity and desire to push the boundaries of what is \
         possible with technology. With over four years of experience working in the IT industry, \
         I have gained a deep understanding of software design and development principles, as well \
         as expertise in various programming languages and frameworks.",
        "I believe that diversity is essential to creating truly innovative solutions, and I am \
         committed to bringing my unique background and perspective to every project I work on.",
        "Feel free to read, comment and share. Enjoy reading!",
    ],
    socials: &[
        ("GitHub", "https://github.com/rajanprakashchand"),
        ("LinkedIn", "https://linkedin.com/in/rajanprakashchand"),
        ("Instagram", "https://instagram.com/rajanprakashchand"),
        ("Facebook", "https://facebook.com/rajanprakashchand"),
    ],
};

/// Section heading: small caps subtitle above the title.
pub struct Heading {
    pub subtitle: &'static str,
    pub title: &'static str,
}

pub const SKILLS_HEADING: Heading = Heading {
    subtitle: "WHAT I DO",
    title: "My Expertise",
};
pub const EDUCATION_HEADING: Heading = Heading {
    subtitle: "MY JOURNEY",
    title: "Education & Qualifications",
};
pub const ABOUT_HEADING: Heading = Heading {
    subtitle: "GET TO KNOW ME",
    title: "About Me",
};
pub const CONTACT_HEADING: Heading = Heading {
    subtitle: "GET IN TOUCH",
    title: "Contact Me",
};

pub struct Skill {
    pub name: &'static str,
    pub description: &'static str,
    /// 0..=100
    pub proficiency: u8,
}

pub const SKILLS: &[Skill] = &[
    Skill {
        name: "Frontend Development",
        description: "Creating responsive, interactive UIs with modern frameworks",
        proficiency: 90,
    },
    Skill {
        name: "Backend Development",
        description: "Building robust API endpoints and server-side applications",
        proficiency: 85,
    },
    Skill {
        name: "Database Management",
        description: "Designing and optimizing database structures",
        proficiency: 80,
    },
    Skill {
        name: "UI/UX Design",
        description: "Creating intuitive and appealing interfaces",
        proficiency: 75,
    },
    Skill {
        name: "DevOps",
        description: "Setting up CI/CD pipelines and cloud infrastructure",
        proficiency: 70,
    },
    Skill {
        name: "Web Security",
        description: "Implementing secure authentication and data protection",
        proficiency: 75,
    },
    Skill {
        name: "Programming Languages",
        description: "JavaScript, Python, Java, C++, PHP",
        proficiency: 85,
    },
    Skill {
        name: "Command Line",
        description: "Proficient with bash, zsh, and PowerShell",
        proficiency: 80,
    },
];

pub struct Education {
    pub degree: &'static str,
    pub institution: &'static str,
    pub location: &'static str,
    pub period: &'static str,
    pub description: &'static str,
    pub achievements: &'static [&'static str],
}

pub const EDUCATION: &[Education] = &[
    Education {
        degree: "Master of Computer Science",
        institution: "Stanford University",
        location: "Stanford, CA",
        period: "2018 - 2020",
        description: "Specialized in Artificial Intelligence and Machine Learning with focus on \
                      neural networks and computer vision applications.",
        achievements: &[
            "Published research paper on efficient neural network architectures",
            "Teaching Assistant for Advanced Algorithms course",
            "GPA: 3.9/4.0",
        ],
    },
    Education {
        degree: "Bachelor of Computer Science",
        institution: "Massachusetts Institute of Technology",
        location: "Cambridge, MA",
        period: "2014 - 2018",
        description: "Major in Computer Science with minor in Mathematics. Focused on software \
                      engineering principles and distributed systems.",
        achievements: &[
            "Dean's List for Academic Excellence (7 semesters)",
            "Won the Annual Coding Hackathon",
            "GPA: 3.8/4.0",
        ],
    },
    Education {
        degree: "Diploma in Full-Stack Development",
        institution: "Tech Academy",
        location: "San Francisco, CA",
        period: "2013 - 2014",
        description: "Intensive one-year program covering modern web development technologies \
                      including JavaScript frameworks, responsive design, and backend architecture.",
        achievements: &[
            "Capstone project featured in Academy showcase",
            "Perfect attendance award",
        ],
    },
    Education {
        degree: "High School Diploma",
        institution: "Westlake High School",
        location: "Austin, TX",
        period: "2009 - 2013",
        description: "Advanced placement courses in Computer Science, Mathematics, and Physics.",
        achievements: &[
            "Valedictorian",
            "President of Computer Science Club",
            "State Mathematics Competition Finalist",
        ],
    },
];

pub struct Experience {
    pub position: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub description: &'static str,
}

pub const EXPERIENCE: &[Experience] = &[
    Experience {
        position: "Senior Software Engineer",
        company: "Tech Innovations Inc.",
        period: "2020 - Present",
        description: "Leading development team for enterprise SaaS products, implementing CI/CD \
                      pipelines, and mentoring junior developers.",
    },
    Experience {
        position: "Software Developer",
        company: "Digital Solutions Ltd.",
        period: "2018 - 2020",
        description: "Developed full-stack web applications using modern JavaScript frameworks \
                      and RESTful APIs.",
    },
    Experience {
        position: "Web Developer Intern",
        company: "WebCraft Studios",
        period: "2017 - 2018",
        description: "Assisted in frontend development tasks and learned industry best practices \
                      for modern web development.",
    },
];

pub const PERSONAL_INFO: &[(&str, &str)] = &[
    ("Name", "Rajan Prakash Chand"),
    ("Age", "28 Years"),
    ("Nationality", "Indian"),
    ("Languages", "English, Hindi"),
    ("Address", "New Delhi, India"),
    ("Freelance", "Available"),
];

pub const SKILL_TAGS: &[&str] = &[
    "JavaScript", "TypeScript", "React", "Node.js", "Python", "Java", "SQL", "MongoDB", "AWS",
    "Docker", "Git", "CI/CD",
];

/// `(value, label)`
pub const STATISTICS: &[(&str, &str)] = &[
    ("5+", "Years of Experience"),
    ("50+", "Projects Completed"),
    ("20+", "Happy Clients"),
    ("3", "Awards"),
];

pub const CONTACT_INTRO: &str = "Feel free to reach out if you have any questions, project \
    inquiries, or just want to say hello. I'm always open to discussing new projects, creative \
    ideas, or opportunities to be part of your vision.";

/// `(title, content)`
pub const CONTACT_INFO: &[(&str, &str)] = &[
    ("Email", "rajan.prakash@example.com"),
    ("Phone", "+91 98765 43210"),
    ("Location", "New Delhi, India"),
];

pub const FOOTER_TAGLINE: &str = "Designed and built with precision and care";

pub static SEARCH_INDEX: &[SearchEntry] = &[
    SearchEntry {
        title: "Frontend Development Skills",
        content: "React, Vue.js, Angular, JavaScript, TypeScript, HTML5, CSS3, and Responsive Design.",
        section: "skills",
    },
    SearchEntry {
        title: "Master's Degree - Stanford University",
        content: "Master of Computer Science with specialization in AI and Machine Learning.",
        section: "education",
    },
    SearchEntry {
        title: "Senior Software Engineer Experience",
        content: "Leading development team for enterprise SaaS products at Tech Innovations Inc.",
        section: "about",
    },
    SearchEntry {
        title: "Contact Information",
        content: "Email: rajan.prakash@example.com, Phone: +91 98765 43210",
        section: "contact",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scroll::SectionTable;

    #[test]
    fn nav_links_form_a_valid_table() {
        let table = SectionTable::from_links(NAV_LINKS).expect("nav links are valid");
        assert_eq!(table.first().id, "home");
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn every_search_entry_links_to_a_section() {
        let table = SectionTable::from_links(NAV_LINKS).expect("nav links are valid");
        for entry in SEARCH_INDEX {
            assert!(table.contains(entry.section), "{} has no section", entry.title);
        }
    }

    #[test]
    fn proficiencies_are_percentages() {
        assert!(SKILLS.iter().all(|s| s.proficiency <= 100));
    }
}
