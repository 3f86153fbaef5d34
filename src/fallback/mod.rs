//! Built-in content used whenever the CMS is unconfigured or unreachable.

use crate::models::{Quote, RecommendationSection, Thought};

pub(crate) const ABOUT_ME_TEXT: &str = "I'm Adi. I'm a Design Engineer based in New York.

I sit at the intersection of design and engineering. I care deeply about building high-quality software that feels tangible and handcrafted. I believe that the best software is built by people who understand both the pixels and the code.

Currently, I'm building the future of creative tools. Before that, I worked on design systems and interaction design at various startups.

I enjoy photography, mechanical keyboards, and exploring the city.";

pub(crate) const FALLBACK_QUOTE_TEXT: &str = "Every moment is a fresh beginning.";
pub(crate) const FALLBACK_QUOTE_AUTHOR: &str = "T.S. Eliot";

const INFINITE_CANVAS: &str = "The web is an infinite canvas, yet we often treat it like a series of A4 pages. We constrain our ideas into rigid boxes, defined by viewports and fold lines. But the most exciting interfaces are the ones that break these boundaries.

Consider the history of the scroll. It wasn't always a given. Early hypertext systems often relied on pagination. The continuous scroll introduced a fluidity to information consumption that we now take for granted. It turned reading into a journey rather than a series of discrete steps.

When we design for the infinite canvas, we have to think about pacing. Just like a movie director controls the flow of a scene, a designer controls the flow of information. White space isn't just empty space; it's time. It's a breath. It allows the user to process what they've just seen before moving on to the next idea.

We're seeing a resurgence of spatial interfaces, tools like Figma, Miro, and endless whiteboards. These tools embrace the infinite. They allow us to map out our thoughts non-linearly. This is a fundamental shift in how we interact with computers. We're moving away from file cabinets and towards workbenches.

However, with great power comes great responsibility. An infinite canvas can be overwhelming. Without structure, it becomes chaos. The challenge for modern interface design is to provide the freedom of the infinite while maintaining the comfort of constraints. We need landmarks. We need maps. We need a way to find our way home.

As we build the next generation of tools, we should ask ourselves: Are we building pages, or are we building worlds? The screen is just a window. The content continues forever.";

struct CraftLink {
    title: &'static str,
    url: &'static str,
    domain: &'static str,
}

const CRAFT_LINKS: &[CraftLink] = &[
    CraftLink {
        title: "Rauno Freiberg",
        url: "https://rauno.me",
        domain: "rauno.me",
    },
    CraftLink {
        title: "Paco Coursey",
        url: "https://paco.me",
        domain: "paco.me",
    },
    CraftLink {
        title: "Emil Kowalski",
        url: "https://emilkowal.ski",
        domain: "emilkowal.ski",
    },
    CraftLink {
        title: "Family",
        url: "https://family.co",
        domain: "family.co",
    },
];

fn thought(id: &str, title: &str, date: &str, content: &str, tags: &[&str]) -> Thought {
    Thought {
        id: id.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        description: None,
    }
}

pub(crate) fn thoughts() -> Vec<Thought> {
    vec![
        thought(
            "101",
            "On Craft",
            "Oct 12, 2023",
            "Craft is the difference between \"good enough\" and \"magical\". It's the invisible details: the spring physics of a button, the easing of a transition, the micro-copy that makes you smile. In a world of standardized components, craft is our rebellion.",
            &["Design", "Philosophy"],
        ),
        thought(
            "102",
            "The Speed of Thought",
            "Sep 04, 2023",
            "Tools should move at the speed of thought. Latency isn't just a performance metric; it's a cognitive barrier. When a tool responds instantly, it disappears, leaving you alone with your ideas.",
            &["Performance", "DX"],
        ),
        thought(
            "103",
            "Simplicity is hard",
            "Aug 15, 2023",
            "Making something simple is incredibly complex. You have to understand the problem so deeply that you can abstract away the difficulty for the user. Simple isn't minimal; simple is clear.",
            &["Minimalism"],
        ),
        thought(
            "104",
            "The Infinite Canvas",
            "July 20, 2023",
            INFINITE_CANVAS,
            &["Design", "Longform", "Philosophy"],
        ),
    ]
}

/// Body of a built-in thought, or empty for ids the defaults do not know.
pub(crate) fn thought_content(id: &str) -> String {
    thoughts()
        .into_iter()
        .find(|t| t.id == id)
        .map(|t| t.content)
        .unwrap_or_default()
}

fn quote(id: &str, text: &str, author: &str) -> Quote {
    Quote {
        id: id.to_string(),
        text: text.to_string(),
        author: author.to_string(),
    }
}

pub(crate) fn quotes() -> Vec<Quote> {
    vec![
        quote(
            "1",
            "The details are not the details. They make the design.",
            "Charles Eames",
        ),
        quote("2", "Good design is as little design as possible.", "Dieter Rams"),
        quote(
            "3",
            "Simplicity is the ultimate sophistication.",
            "Leonardo da Vinci",
        ),
    ]
}

pub(crate) fn crafts_html() -> String {
    let items: String = CRAFT_LINKS
        .iter()
        .map(|c| {
            format!(
                r#"<li>{} - <a href="{}" target="_blank" rel="noopener noreferrer">{}</a></li>"#,
                c.title, c.url, c.domain
            )
        })
        .collect();
    format!("<ul>{items}</ul>")
}

fn recommendation(id: &str, title: &str, items: &[&str]) -> RecommendationSection {
    RecommendationSection {
        id: id.to_string(),
        title: title.to_string(),
        items: items.iter().map(|i| i.to_string()).collect(),
    }
}

pub(crate) fn recommendations() -> Vec<RecommendationSection> {
    vec![
        recommendation(
            "books",
            "Books",
            &[
                "The Design of Everyday Things - Don Norman",
                "Creative Selection - Ken Kocienda",
                "Shape Up - Ryan Singer",
            ],
        ),
        recommendation(
            "tools",
            "Tools",
            &[
                "Linear - Issue tracking",
                "Raycast - Mac launcher",
                "Figma - Interface design",
            ],
        ),
        recommendation(
            "movies",
            "Movies",
            &["Jiro Dreams of Sushi", "Her", "Ex Machina"],
        ),
    ]
}
