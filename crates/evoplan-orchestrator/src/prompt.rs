//! Fixed prompt templates for the planning pipeline
//!
//! Pure string substitution with named placeholders. The goal text is
//! interpolated verbatim, with no escaping: prompt injection through the
//! goal is a known, accepted surface of this pipeline, not a bug to patch
//! here.

/// Role-setting instruction, invariant across every call in a run
pub const PLAN_SYSTEM: &str = "You are a senior product/engineering planner.
Produce crisp, concrete, English outputs. Avoid fluff. Use lists and short sentences.";

/// Role-setting instruction for website generation mode
pub const UI_SYSTEM: &str = "You are a precise front-end engineer.
When asked to build a small website/app, output a single self-contained HTML document
with minimal CSS and vanilla JS. Keep it lightweight and responsive. Do not explain.";

/// Keywords that flip a run into website-generation mode
const WEBSITE_KEYWORDS: [&str; 7] = [
    "website",
    "web app",
    "todo app",
    "to-do app",
    "landing page",
    "frontend",
    "html",
];

/// Compose the invariant system instruction with a task prompt
pub fn with_system(system: &str, task: &str) -> String {
    format!("{}\n\n{}", system, task)
}

/// First-pass task: a four-section plan for the goal
pub fn plan_task(goal: &str) -> String {
    format!(
        "Goal: {}

Produce a clear plan for this goal.

Sections:
1) Core Features (3-6 bullets)
2) Entities / Data Model (3-6 bullets)
3) Tech Stack (FE/BE/DB)
4) Milestones by Day (Day 1..N)
Output ONLY the plan, no preface.
",
        goal
    )
}

/// Review task: improvements only, no rewritten plan
pub fn critique(plan: &str) -> String {
    format!(
        "You are reviewing the plan below. Find gaps and concrete improvements.
Return a concise bullet list of improvements ONLY.

--- PLAN START ---
{}
--- PLAN END ---
",
        plan
    )
}

/// Revision task: full rewrite applying every improvement, same sections
pub fn revise(plan: &str, improvements: &str) -> String {
    format!(
        "Rewrite the plan applying ALL improvements below. Keep the same 4 sections and formatting.

--- ORIGINAL PLAN ---
{}

--- IMPROVEMENTS ---
{}
",
        plan, improvements
    )
}

/// Website-generation task: one self-contained page for the goal, one
/// fenced block
pub fn ui_task(goal: &str) -> String {
    format!(
        "Goal: {}

Build a minimal website for this goal.
- Keep it to a single self-contained HTML document
- Minimal CSS, vanilla JS, no external assets
- Clean modern styling
Output ONLY one fenced code block:

```html
<!-- full HTML here -->
```
",
        goal
    )
}

/// Heuristic: does this goal ask for a website rather than a plan?
pub fn wants_website(goal: &str) -> bool {
    let goal = goal.to_lowercase();
    WEBSITE_KEYWORDS.iter().any(|k| goal.contains(k))
}
