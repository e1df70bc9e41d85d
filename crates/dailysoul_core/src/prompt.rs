//! Daily reflective prompt.
//!
//! The prompt is picked from the day of year, so one calendar day always
//! shows the same prompt and the list cycles once exhausted.

use chrono::{Datelike, NaiveDate};

const PROMPTS: &[&str] = &[
    "What brought you peace today?",
    "What are you grateful for right now?",
    "How did you spend your energy today?",
    "What made you smile today?",
    "What is weighing on your heart?",
    "What did you learn about yourself today?",
    "Where did you find beauty today?",
    "What are you looking forward to?",
    "How are you feeling in this moment?",
    "What would you tell your younger self?",
    "What made today different?",
    "Where did you feel most alive today?",
    "What kindness did you witness or practice?",
    "What are you holding onto, and why?",
    "How did nature speak to you today?",
    "What moment do you want to remember?",
    "What truth revealed itself to you?",
    "How did you show up for yourself today?",
    "What brought you comfort?",
    "What are you ready to release?",
    "Where did you find stillness today?",
    "What conversation nourished your soul?",
    "How did your body feel today?",
    "What small joy did you notice?",
    "What are you curious about right now?",
    "How did you honor your own boundaries today?",
    "What dream are you nurturing?",
    "Where did you feel connected today?",
    "What surprised you today?",
    "How are you growing right now?",
];

/// Prompt for the given calendar day.
pub fn prompt_for(date: NaiveDate) -> &'static str {
    let index = (date.ordinal0() as usize) % PROMPTS.len();
    PROMPTS[index]
}
