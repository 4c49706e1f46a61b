//! Keyword taxonomies and other static keyword data.
//!
//! Trigger phrases are stored lower-case and matched as case-insensitive
//! substrings of a sentence. Some phrases carry a trailing space on purpose
//! (`"lead "` must not fire on "leader").

/// A named category and its trigger phrases, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub triggers: &'static [&'static str],
}

impl Category {
    /// First trigger contained in `lowered`, which must already be lower-case.
    pub fn first_trigger_in(&self, lowered: &str) -> Option<&'static str> {
        self.triggers
            .iter()
            .copied()
            .find(|trigger| lowered.contains(trigger))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taxonomy {
    pub name: &'static str,
    pub categories: &'static [Category],
}

impl Taxonomy {
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|c| c.label)
    }

    pub fn category(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    /// Every (category, trigger) pair in declaration order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.categories
            .iter()
            .flat_map(|c| c.triggers.iter().map(move |t| (c.label, *t)))
    }
}

pub static COMPETENCIES: Taxonomy = Taxonomy {
    name: "competencies",
    categories: &[
        Category {
            label: "teamwork",
            triggers: &[
                "supervised", "facilitated", "planned", "plan", "served", "serve",
                "project lead", "managing", "managed", "lead ", "project team", "team",
                "conducted", "worked", "gathered", "organized", "mentored", "assist", "review",
                "help", "involve", "share", "support", "coordinate", "cooperate", "contributed",
            ],
        },
        Category {
            label: "communication",
            triggers: &[
                "addressed", "collaborated", "conveyed", "enlivened", "instructed", "performed",
                "presented", "spoke", "trained", "author", "communicate", "define", "influence",
                "negotiated", "outline", "proposed", "persuaded", "edit", "interviewed",
                "summarize", "translate", "write", "wrote", "project plan", "business case",
                "proposal", "writeup",
            ],
        },
        Category {
            label: "analytical",
            triggers: &[
                "process improvement", "competitive analysis", "aligned", "strategive planning",
                "cost savings", "researched ", "identified", "created", "led", "measure",
                "program", "quantify", "forecasr", "estimate", "analyzed", "survey", "reduced",
                "cut cost", "conserved", "budget", "balanced", "allocate", "adjust", "lauched",
                "hired", "spedup", "speedup", "ran", "run", "enchanced", "developed",
            ],
        },
        Category {
            label: "result_driven",
            triggers: &[
                "cut", "decrease", "eliminate", "increase", "lower", "maximize", "rasie",
                "reduce", "accelerate", "accomplish", "advance", "boost", "change", "improve",
                "saved", "save", "solve", "solved", "upgrade", "fix", "fixed", "correct",
                "achieve",
            ],
        },
        Category {
            label: "leadership",
            triggers: &[
                "advise", "coach", "guide", "influence", "inspire", "instruct", "teach",
                "authorized", "chair", "control", "establish", "execute", "hire", "multi-task",
                "oversee", "navigate", "prioritize", "approve", "administer", "preside",
                "enforce", "delegate", "coordinate", "streamlined", "produce", "review",
                "supervise", "terminate", "found", "set up", "spearhead", "originate",
                "innovate", "implement", "design", "launch", "pioneer", "institute",
            ],
        },
    ],
};

pub static MEASURABLE_RESULTS: Taxonomy = Taxonomy {
    name: "measurable_results",
    categories: &[
        Category {
            label: "metrics",
            triggers: &[
                "saved", "increased", "$ ", "%", "percent", "upgraded", "fundraised ",
                "millions", "thousands", "hundreds", "reduced annual expenses ", "profits",
                "growth", "sales", "volume", "revenue", "reduce cost", "cut cost", "forecast",
                "increase in page views", "user engagement", "donations",
                "number of cases closed", "customer ratings", "client retention",
                "tickets closed", "response time", "average", "reduced customer complaints",
                "managed budget", "numeric_value",
            ],
        },
        Category {
            label: "action_words",
            triggers: &[
                "developed", "led", "analyzed", "collaborated", "conducted", "performed",
                "recruited", "improved", "founded", "transformed", "composed", "conceived",
                "designed", "devised", "established", "generated", "implemented", "initiated",
                "instituted", "introduced", "launched", "opened", "originated", "pioneered",
                "planned", "prepared", "produced", "promoted", "started", "released",
                "administered", "assigned", "chaired", "consolidated", "contracted",
                "co-ordinated", "delegated", "directed", "evaluated", "executed", "organized",
                "oversaw", "prioritized", "recommended", "reorganized", "reviewed", "scheduled",
                "supervised", "guided", "advised", "coached", "demonstrated", "illustrated",
                "presented", "taught", "trained", "mentored", "spearheaded", "authored",
                "accelerated", "achieved", "allocated", "completed", "awarded", "persuaded",
                "revamped", "influenced", "assessed", "clarified", "counseled", "diagnosed",
                "educated", "facilitated", "familiarized", "motivated", "participated",
                "provided", "referred", "rehabilitated", "reinforced", "represented",
                "moderated", "verified", "adapted", "coordinated", "enabled", "encouraged",
                "explained", "informed", "instructed", "lectured", "stimulated", "classified",
                "collated", "defined", "forecasted", "identified", "interviewed", "investigated",
                "researched", "tested", "traced", "interpreted", "uncovered", "collected",
                "critiqued", "examined", "extracted", "inspected", "inspired", "summarized",
                "surveyed", "systemized", "arranged", "budgeted", "controlled", "eliminated",
                "itemised", "modernised", "operated", "organised", "processed", "redesigned",
                "reduced", "refined", "resolved", "revised", "simplified", "solved",
                "streamlined", "appraised", "audited", "balanced", "calculated", "computed",
                "projected", "restructured", "modelled", "customized", "fashioned", "integrated",
                "proved", "revitalized", "set up", "shaped", "structured", "tabulated",
                "validated", "approved", "catalogued", "compiled", "dispatched", "filed",
                "monitored", "ordered", "purchased", "recorded", "retrieved", "screened",
                "specified", "systematized", "conceptualized", "brainstomed", "tasked",
                "supported", "proposed", "boosted", "earned", "negotiated", "navigated",
                "updated", "utilized",
            ],
        },
        Category {
            label: "weak_words",
            triggers: &[
                "i", "got", "i've", "because", "our", "me", "he", "her", "him", "she", "helped",
                "familiar", "asssisted", "like", "enjoy", "love", "did", "tried", "attempted",
                "worked", "approximately", "managed", "manage", "create", "created",
            ],
        },
    ],
};

/// Degree and school-board abbreviations. Only matched when written in
/// upper case in the document.
pub const EDUCATION_DEGREES: &[&str] = &[
    "BE", "B.E.", "B.E", "BS", "B.S", "ME", "M.E", "M.E.", "MS", "M.S", "BTECH", "MTECH", "SSC",
    "HSC", "CBSE", "ICSE", "X", "XII",
];

pub const MONTHS_SHORT: &str = r"jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec";
pub const MONTHS_LONG: &str =
    r"january|february|march|april|may|june|july|august|september|october|november|december";
pub const YEAR: &str = r"(?:19|20)\d{2}";
