//! Static question bank: pre-authored MCQs keyed by subject, plus the
//! topic sets used for prompt building and enumeration.
//!
//! The bank is read-only after startup and has no failure modes: unknown
//! subjects fall back to the default subject's pool, and an empty pool
//! falls back to a hard-coded study-skills question.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::error;

use crate::config::BankEntryCfg;
use crate::domain::Mcq;

pub const DEFAULT_SUBJECT: &str = "English";

#[derive(Clone)]
pub struct QuestionBank {
  by_subject: HashMap<String, Vec<Mcq>>,
  topics: HashMap<String, Vec<String>>,
  generic_topics: Vec<String>,
}

impl QuestionBank {
  /// Built-in entries that guarantee the app is useful even without
  /// external config or OpenAI.
  pub fn builtin() -> Self {
    let mut by_subject: HashMap<String, Vec<Mcq>> = HashMap::new();
    for entry in builtin_questions() {
      by_subject.entry(entry.subject.clone()).or_default().push(entry);
    }
    Self {
      by_subject,
      topics: builtin_topics(),
      generic_topics: vec!["Core".to_string()],
    }
  }

  /// All known subjects, sorted. Union of the topic map and the question
  /// pools so config-added subjects always show up.
  pub fn subjects(&self) -> Vec<String> {
    let mut out: Vec<String> = self
      .topics
      .keys()
      .chain(self.by_subject.keys())
      .cloned()
      .collect();
    out.sort();
    out.dedup();
    out
  }

  pub fn topics_for(&self, subject: &str) -> &[String] {
    self
      .topics
      .get(subject)
      .map(Vec::as_slice)
      .unwrap_or(&self.generic_topics)
  }

  pub fn has_topic(&self, subject: &str, topic: &str) -> bool {
    self.topics_for(subject).iter().any(|t| t == topic)
  }

  pub fn count_for(&self, subject: &str) -> usize {
    self.by_subject.get(subject).map(Vec::len).unwrap_or(0)
  }

  /// Pick one demo question for `subject`, uniformly at random among its
  /// entries. Unknown subjects are served from the default subject's pool.
  pub fn demo_for<R: Rng + ?Sized>(&self, subject: &str, rng: &mut R) -> Mcq {
    let pool = self
      .by_subject
      .get(subject)
      .filter(|v| !v.is_empty())
      .or_else(|| self.by_subject.get(DEFAULT_SUBJECT));
    match pool.and_then(|v| v.choose(rng)) {
      Some(q) => q.clone(),
      None => hard_fallback_question(subject),
    }
  }

  /// Insert a config-provided entry. Invalid entries are logged and skipped
  /// so one bad row cannot poison the bank.
  pub fn push_entry(&mut self, cfg: BankEntryCfg) -> bool {
    let valid = cfg.options.len() == 4
      && cfg.correct_index <= 3
      && (1..=5).contains(&cfg.difficulty)
      && !cfg.subject.trim().is_empty()
      && !cfg.question.trim().is_empty()
      && !cfg.explanation.trim().is_empty();
    if !valid {
      error!(target: "question", subject = %cfg.subject, "Skipping bank entry: does not satisfy the MCQ schema.");
      return false;
    }

    if let Some(topic) = &cfg.topic {
      let topics = self.topics.entry(cfg.subject.clone()).or_default();
      if !topics.iter().any(|t| t == topic) {
        topics.push(topic.clone());
      }
    }

    self.by_subject.entry(cfg.subject.clone()).or_default().push(Mcq {
      subject: cfg.subject,
      topic: cfg.topic,
      difficulty: cfg.difficulty,
      question: cfg.question,
      options: cfg.options,
      correct_index: cfg.correct_index,
      explanation: cfg.explanation,
    });
    true
  }
}

/// Absolute last-resort fallback: served only if a pool is somehow empty.
pub fn hard_fallback_question(subject: &str) -> Mcq {
  q(
    subject,
    "Core",
    2,
    "Which revision strategy is most strongly supported by evidence?",
    [
      "Re-reading notes",
      "Highlighting the textbook",
      "Spaced retrieval practice",
      "Cramming the night before",
    ],
    2,
    "Spaced retrieval practice consistently outperforms passive review.",
  )
}

fn q(
  subject: &str,
  topic: &str,
  difficulty: u8,
  question: &str,
  options: [&str; 4],
  correct_index: u8,
  explanation: &str,
) -> Mcq {
  Mcq {
    subject: subject.to_string(),
    topic: Some(topic.to_string()),
    difficulty,
    question: question.to_string(),
    options: options.iter().map(|o| o.to_string()).collect(),
    correct_index,
    explanation: explanation.to_string(),
  }
}

fn builtin_topics() -> HashMap<String, Vec<String>> {
  let entries: [(&str, &[&str]); 8] = [
    ("English", &["Language analysis", "Argument analysis", "Comparative"]),
    ("Mathematical Methods", &["Functions", "Calculus", "Probability", "Algebra"]),
    ("Specialist Mathematics", &["Complex numbers", "Vectors", "Matrices", "Mechanics"]),
    ("Chemistry", &["Stoichiometry", "Acids and bases", "Redox", "Organic"]),
    ("Physics", &["Kinematics", "Dynamics", "Electricity", "Waves"]),
    ("Biology", &["Cells", "Genetics", "Evolution", "Homeostasis"]),
    ("Economics", &["Microeconomics", "Macroeconomics", "Policy", "Markets"]),
    ("Psychology", &["Research methods", "Learning", "Memory", "Neuropsychology"]),
  ];
  entries
    .iter()
    .map(|(subject, topics)| {
      (
        subject.to_string(),
        topics.iter().map(|t| t.to_string()).collect(),
      )
    })
    .collect()
}

fn builtin_questions() -> Vec<Mcq> {
  vec![
    q(
      "English",
      "Language analysis",
      2,
      "Which statement best describes the author's tone?",
      ["Dismissive", "Cautiously optimistic", "Ironic", "Indifferent"],
      1,
      "Phrases like \"promising, provided\" indicate cautious optimism.",
    ),
    q(
      "English",
      "Argument analysis",
      2,
      "Which feature most directly strengthens an author's appeal to logic (logos)?",
      ["Emotive adjectives", "Inclusive language", "Statistical evidence", "Anecdotes"],
      2,
      "Logos is supported by verifiable data such as statistics.",
    ),
    q(
      "Mathematical Methods",
      "Functions",
      2,
      "For f(x) = x^2 - 4x, the x-coordinate of the vertex is:",
      ["-4", "-2", "2", "4"],
      2,
      "Vertex at -b/(2a) = -(-4)/(2*1) = 2.",
    ),
    q(
      "Mathematical Methods",
      "Calculus",
      3,
      "If f(x) = 3x^2 - 6x, what x maximises/minimises f?",
      ["x = -1", "x = 0", "x = 1", "x = 2"],
      2,
      "f'(x) = 6x - 6 = 0 gives x = 1 (turning point).",
    ),
    q(
      "Specialist Mathematics",
      "Complex numbers",
      3,
      "The modulus of z = 3 - 4i is:",
      ["1", "5", "7", "25"],
      1,
      "|z| = sqrt(3^2 + (-4)^2) = sqrt(25) = 5.",
    ),
    q(
      "Chemistry",
      "Stoichiometry",
      3,
      "0.25 mol Na2CO3 reacts with excess HCl. Moles of CO2 produced?",
      ["0.125", "0.25", "0.50", "1.00"],
      1,
      "1:1 stoichiometry Na2CO3 to CO2.",
    ),
    q(
      "Chemistry",
      "Acids and bases",
      2,
      "Which solution has the lowest pH?",
      ["0.10 M HCl", "0.10 M CH3COOH", "0.10 M NH3", "Pure water"],
      0,
      "Strong acid at same molarity yields lowest pH.",
    ),
    q(
      "Physics",
      "Kinematics",
      2,
      "A car accelerates uniformly from rest to 20 m/s in 5.0 s. Its acceleration is:",
      ["0.25 m/s^2", "2.0 m/s^2", "4.0 m/s^2", "100 m/s^2"],
      2,
      "a = delta-v / delta-t = 20 / 5.0 = 4.0 m/s^2.",
    ),
    q(
      "Physics",
      "Electricity",
      3,
      "A 6.0 ohm resistor carries a current of 2.0 A. The power dissipated is:",
      ["3.0 W", "12 W", "24 W", "72 W"],
      2,
      "P = I^2 R = 4.0 * 6.0 = 24 W.",
    ),
    q(
      "Biology",
      "Cells",
      2,
      "Which organelle is the main site of ATP production in eukaryotic cells?",
      ["Ribosome", "Mitochondrion", "Golgi apparatus", "Lysosome"],
      1,
      "Aerobic respiration in the mitochondrion yields most of the cell's ATP.",
    ),
    q(
      "Biology",
      "Genetics",
      3,
      "Two heterozygous parents (Aa x Aa) are crossed. The expected proportion of offspring showing the recessive phenotype is:",
      ["0%", "25%", "50%", "75%"],
      1,
      "The aa genotype occurs in 1 of 4 Punnett square outcomes.",
    ),
    q(
      "Economics",
      "Microeconomics",
      2,
      "Holding all else constant, an increase in the price of a good will typically:",
      [
        "Increase quantity demanded",
        "Decrease quantity demanded",
        "Shift the demand curve right",
        "Shift the demand curve left",
      ],
      1,
      "The law of demand: price and quantity demanded are inversely related along the curve.",
    ),
    q(
      "Psychology",
      "Research methods",
      2,
      "In an experiment, the variable the researcher deliberately manipulates is the:",
      [
        "Dependent variable",
        "Independent variable",
        "Controlled variable",
        "Extraneous variable",
      ],
      1,
      "The independent variable is manipulated to measure its effect on the dependent variable.",
    ),
  ]
}
