//! Copy shown by the widgets and the final letter.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootLine {
    pub text: String,
    pub delay_ms: u64,
}

pub fn make_boot_lines(days: i64, her_name: &str) -> Vec<BootLine> {
    let line = |text: String, delay_ms: u64| BootLine { text, delay_ms };
    vec![
        line("Booting LoveOS v1.0...".into(), 650),
        line("Loading memories...".into(), 650),
        line("Mounting HeartMonitor.sys...".into(), 650),
        line("Checking Surprise.lock...".into(), 650),
        line(format!("Connecting to: {her_name} ❤️"), 900),
        line("Relationship status: ACTIVE".into(), 650),
        line(format!("Days online: {days}"), 650),
        line("System stable.".into(), 800),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reason {
    pub title: &'static str,
    pub body: &'static str,
}

pub const REASONS: [Reason; 5] = [
    Reason {
        title: "One reason…",
        body: "Because you're crazy… in the best possible way.",
    },
    Reason {
        title: "Another one…",
        body: "Because you understand me!",
    },
    Reason {
        title: "This one is a bit cheeky…",
        body: "Because you drive me wild.",
    },
    Reason {
        title: "What I love about you…",
        body: "Because you're an adventurer and I can't wait to see the world with you.",
    },
    Reason {
        title: "The most serious reason…",
        body: "Because one day you'll be the best mother to my children.",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    pub correct_index: usize,
    /// Option that runs away instead of being answered.
    pub evasive_index: Option<usize>,
}

pub const QUESTIONS: [Question; 5] = [
    Question {
        prompt: "Where was our first kiss?",
        options: &["Đulić", "Vicenza", "Banja Vrućica"],
        correct_index: 2,
        evasive_index: None,
    },
    Question {
        prompt: "Which club does your husband support?",
        options: &["Arsenal", "Chelsea", "Real Madrid"],
        correct_index: 1,
        evasive_index: None,
    },
    Question {
        prompt: "Which pancake does Martina adore?",
        options: &["Nutella", "Pistachio", "Kinder"],
        correct_index: 1,
        evasive_index: None,
    },
    Question {
        prompt: "What does Martina say when Nedo sends a cheeky reel?",
        options: &["Aloooo", "Nedoooooooo", "Are you serious"],
        correct_index: 1,
        evasive_index: None,
    },
    Question {
        prompt: "What is the best surname in Jezera?",
        options: &["Kusić", "Panić"],
        correct_index: 1,
        evasive_index: Some(0),
    },
];

pub const HEART_MESSAGE: [&str; 2] = [
    "❤️ 90%.",
    "We'll fill the other 10% together when you get here 🙄",
];

pub const LOCK_REWARD: &str = "Reward: dinner + massage.";

pub const FINAL_LETTER: &str = "\
Kusicka,

If you made it this far, you passed all of my little tests. I hope you go
easy on me when your tests for me come around.

I really hope you liked all of this. I just want to say I'm glad you walked
into my life so unexpectedly. We will have hard moments, and this is my
promise that I'll give everything so we make it, as a couple and as people,
and that I'll cheer you on in everything you set out to do.

I love that you bombard me with your random questions and that we can talk
about anything. I'd like it to stay that way: lovers and best friends at the
same time, and a fortress you can always run to whenever you need to feel
safe.

Your Nedo ❤️
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_lines_mention_days_and_name() {
        let lines = make_boot_lines(42, "Ana");
        assert_eq!(lines.len(), 8);
        assert!(lines.iter().any(|l| l.text == "Days online: 42"));
        assert!(lines.iter().any(|l| l.text.contains("Ana")));
    }

    #[test]
    fn only_final_question_is_evasive() {
        let (last, rest) = QUESTIONS.split_last().unwrap();
        assert!(last.evasive_index.is_some());
        assert_ne!(last.evasive_index, Some(last.correct_index));
        assert!(rest.iter().all(|q| q.evasive_index.is_none()));
        assert!(QUESTIONS.iter().all(|q| q.correct_index < q.options.len()));
    }
}
