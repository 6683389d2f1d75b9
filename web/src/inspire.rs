/// Goal categories for the inspiration catalog
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Category {
    Fitness,
    Travel,
    Personal,
    Career,
    Relationships,
    Learning,
    Financial,
    Wellness,
}

impl Category {
    pub(crate) const fn label(self) -> &'static str {
        use Category::*;
        match self {
            Fitness => "fitness",
            Travel => "travel",
            Personal => "personal",
            Career => "career",
            Relationships => "relationships",
            Learning => "learning",
            Financial => "financial",
            Wellness => "wellness",
        }
    }
}

/// Ready-made resolution ideas offered in the goal dialog
pub(crate) const INSPIRATIONS: &[(&str, Category)] = &[
    ("Benchpress 100kg", Category::Fitness),
    ("Run a 5K race", Category::Fitness),
    ("Complete 30 days of yoga", Category::Fitness),
    ("Go hiking once a month", Category::Fitness),
    ("Visit the gym 100 times this year", Category::Fitness),
    ("Join a sports team or club", Category::Fitness),
    ("Visit Japan", Category::Travel),
    ("Take a solo trip", Category::Travel),
    ("Go camping in 3 different locations", Category::Travel),
    ("Go on a road trip", Category::Travel),
    ("Visit 3 new countries", Category::Travel),
    ("Explore 5 nearby cities", Category::Travel),
    ("Meditate for 10 minutes daily", Category::Personal),
    ("Keep a journal for 6 months", Category::Personal),
    ("Start a new hobby", Category::Personal),
    ("Volunteer monthly", Category::Personal),
    ("Read 24 books", Category::Personal),
    ("Have a digital detox weekend", Category::Personal),
    ("Learn 3 new job-related skills", Category::Career),
    ("Attend 3 networking events", Category::Career),
    ("Start a side project", Category::Career),
    ("Find a mentor", Category::Career),
    ("Give a presentation at work", Category::Career),
    ("Take an online course in your field", Category::Career),
    ("Have 1 date night per month", Category::Relationships),
    ("Call parents every month", Category::Relationships),
    ("Organize monthly friend gatherings", Category::Relationships),
    ("Write thank-you notes to 5 people", Category::Relationships),
    ("Attend a family reunion", Category::Relationships),
    ("Start a new family tradition", Category::Relationships),
    ("Learn a new language", Category::Learning),
    ("Learn to play an instrument", Category::Learning),
    ("Master 10 new recipes", Category::Learning),
    ("Take an art class", Category::Learning),
    ("Build a personal project using code", Category::Learning),
    ("Learn a new style of dance", Category::Learning),
    ("Save 20% of monthly income", Category::Financial),
    ("Start investing regularly", Category::Financial),
    ("Pay off a specific debt", Category::Financial),
    ("Create and stick to a budget", Category::Financial),
    ("Build emergency fund", Category::Financial),
    ("Create a passive income stream", Category::Financial),
    ("Maintain consistent sleep schedule", Category::Wellness),
    ("Drink 2L of water daily", Category::Wellness),
    ("Meal prep weekly", Category::Wellness),
    ("Spend time in nature weekly", Category::Wellness),
    ("Practice stress management techniques", Category::Wellness),
    ("Reduce screen time by 30%", Category::Wellness),
];

/// Uniform pick from the catalog
pub(crate) fn random_inspiration() -> &'static str {
    let roll = (js_sys::Math::random() * INSPIRATIONS.len() as f64) as usize;
    INSPIRATIONS[roll.min(INSPIRATIONS.len() - 1)].0
}
