//! Built-in question and archetype catalogs.
//!
//! This is the canonical professional edition: ten scored questions with
//! weighted primary/secondary answers, one role/demographic question, and
//! eleven archetypes. A TOML file can replace the whole catalog (see
//! `config`), but the app is fully usable without one.

use std::collections::BTreeMap;

use crate::domain::{Archetype, Question, QuizCatalog};

fn pairs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
  entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn question(id: u32, prompt: &str, answers: &[(&str, &str)], scoring: &[(&str, &str)]) -> Question {
  Question {
    id,
    prompt: prompt.to_string(),
    answers: pairs(answers),
    scoring: pairs(scoring),
    role: false,
  }
}

#[allow(clippy::too_many_arguments)]
fn archetype(
  id: &str,
  name: &str,
  description: &str,
  characteristics: &[&str],
  approach: &str,
  risk: &str,
  icon: &str,
  color: &str,
) -> Archetype {
  Archetype {
    id: id.to_string(),
    name: name.to_string(),
    description: description.to_string(),
    characteristics: characteristics.iter().map(|c| c.to_string()).collect(),
    approach: approach.to_string(),
    risk: risk.to_string(),
    icon: icon.to_string(),
    color: color.to_string(),
  }
}

/// The full built-in catalog. Archetype declaration order below is the
/// tie-break order used by the resolver.
pub fn builtin_catalog() -> QuizCatalog {
  let archetypes = vec![
    archetype(
      "innovator",
      "The Innovator",
      "Hands-on experimenter who treats every new AI capability as something to try this week.",
      &[
        "First to test new tools",
        "Shares working demos, not slide decks",
        "Comfortable with rough edges",
        "Learns by building",
      ],
      "Give them early access and a sandbox; route their findings into the wider rollout.",
      "May ship experiments into production paths before anyone has reviewed them.",
      "🚀",
      "#667eea",
    ),
    archetype(
      "strategist",
      "The Strategist",
      "Connects AI adoption to business goals and sequencing; wants a plan before a pilot.",
      &[
        "Thinks in roadmaps and milestones",
        "Ties tooling to outcomes",
        "Asks who owns what",
        "Allergic to aimless pilots",
      ],
      "Involve them in rollout planning early and let them define the success criteria.",
      "Can slow genuinely useful bottom-up adoption while the plan is being perfected.",
      "🧭",
      "#2b6cb0",
    ),
    archetype(
      "analyst",
      "The Analyst",
      "Wants evidence, baselines, and measured quality before changing how work is done.",
      &[
        "Asks for data and KPIs",
        "Designs honest comparisons",
        "Distrusts anecdotes",
        "Methodical decision-maker",
      ],
      "Run structured pilots with clear metrics and share the raw results with them.",
      "May demand measurement rigor that costs more than the decision it informs.",
      "📊",
      "#38a169",
    ),
    archetype(
      "guardian",
      "The Guardian",
      "Prioritizes safety, ethics, and compliance; checks who could be harmed before asking what could be gained.",
      &[
        "Raises ethical concerns early",
        "Reads the data-handling fine print",
        "Values review processes",
        "Thoughtful about second-order effects",
      ],
      "Put them on risk assessment and policy work; their sign-off carries weight with skeptics.",
      "Can become a bottleneck if every use case needs their personal review.",
      "🛡️",
      "#805ad5",
    ),
    archetype(
      "skeptic",
      "The Skeptic",
      "Doubts the hype cycle; expects most AI initiatives to quietly stall.",
      &[
        "Questions vendor claims",
        "Remembers the last three fads",
        "Hard to impress, harder to fool",
        "Keeps expectations grounded",
      ],
      "Show small, relevant wins on their own work rather than industry case studies.",
      "May dismiss a genuine capability shift until the team is behind competitors.",
      "🤨",
      "#718096",
    ),
    archetype(
      "traditionalist",
      "The Traditionalist",
      "Prefers established methods that already work; adopts new tools last, if at all.",
      &[
        "Values consistency and craft",
        "Deep in the current process",
        "Wary of churn for its own sake",
        "Institutional memory of the team",
      ],
      "Start with low-stakes assists inside their existing workflow instead of replacing it.",
      "Expertise can calcify into resistance that blocks the team's ability to adapt.",
      "📚",
      "#975a16",
    ),
    archetype(
      "worrier",
      "The Worrier",
      "Feels personally threatened by AI's impact on their role and future.",
      &[
        "Quietly anxious about change",
        "Asks about job security",
        "Needs reassurance, not pep talks",
        "Watches how others are treated",
      ],
      "Address job security directly and pair announcements with concrete upskilling paths.",
      "Unaddressed anxiety leaks into the team as quiet disengagement.",
      "😰",
      "#dd6b20",
    ),
    archetype(
      "opportunist",
      "The Opportunist",
      "Sees AI as the lever to leap ahead, disrupt, or win; moves fast and asks later.",
      &[
        "High-energy, competitive mindset",
        "Spots leverage quickly",
        "Comfortable with risk",
        "Pushes the organization to move",
      ],
      "Channel the energy toward competitive advantage while keeping guardrails visible.",
      "Speed without guardrails turns wins into cleanup projects.",
      "⚡",
      "#d69e2e",
    ),
    archetype(
      "egalitarian",
      "The Egalitarian",
      "Focused on fair access: who gets the tools, the training, and the upside.",
      &[
        "Tracks who is included",
        "Pushes for shared access",
        "Questions two-tier rollouts",
        "Measures fairness, not just output",
      ],
      "Involve them in rollout design; they will find the access gaps before the retro does.",
      "Insisting on perfectly even rollouts can delay value for everyone.",
      "⚖️",
      "#319795",
    ),
    archetype(
      "humanitarian",
      "The Humanitarian",
      "Puts team wellbeing and morale first; technology is judged by what it does to people.",
      &[
        "Asks about people impact",
        "Mentors those most at risk",
        "Reads the room accurately",
        "Advocates for support structures",
      ],
      "Engage them in change management; they are the early-warning system for morale.",
      "May resist changes that are hard on a few people but necessary for the many.",
      "🤝",
      "#e53e3e",
    ),
    archetype(
      "pragmatist",
      "The Pragmatist",
      "Adopts whatever demonstrably helps, ignores whatever doesn't, and keeps the work moving.",
      &[
        "Neither hype nor dread",
        "Tests against real tasks",
        "Keeps humans in the loop",
        "Steady under pressure",
      ],
      "Give them working defaults and stay out of the way; they normalize adoption for everyone else.",
      "Quiet pragmatism can read as indifference when louder voices set direction.",
      "🔧",
      "#4a5568",
    ),
  ];

  let questions = vec![
    question(
      1,
      "Your company announces a new AI initiative. Your first move?",
      &[
        ("A", "Volunteer to pilot it — someone has to go first."),
        ("B", "Ask for the business case and the sequencing."),
        ("C", "Wonder, quietly, what it means for your job."),
        ("D", "Ask what safeguards and review steps are planned."),
        ("E", "Assume it will blow over like the last initiative."),
        ("F", "Look for the angle that puts you ahead of the pack."),
        ("G", "Ask how support staff and junior people will be affected."),
      ],
      &[
        ("A", "innovator"),
        ("B", "strategist"),
        ("C", "worrier"),
        ("D", "guardian"),
        ("E", "skeptic"),
        ("F", "opportunist"),
        ("G", "humanitarian"),
      ],
    ),
    question(
      2,
      "A colleague ships a project in half the time using AI tools. Your reaction?",
      &[
        ("A", "Ask them to walk you through the whole setup."),
        ("B", "Ask whether anyone measured the output quality."),
        ("C", "Worry you won't be able to keep up."),
        ("D", "Raise the data-handling questions nobody asked."),
        ("E", "Doubt the result would survive a close look."),
        ("F", "Start planning how to automate more of your own work."),
        ("G", "Check whether anyone was shut out of learning the same trick."),
      ],
      &[
        ("A", "innovator"),
        ("B", "analyst"),
        ("C", "worrier"),
        ("D", "guardian"),
        ("E", "skeptic"),
        ("F", "opportunist"),
        ("G", "egalitarian"),
      ],
    ),
    question(
      3,
      "Leadership proposes giving AI tools to one team first and expanding later. You:",
      &[
        ("A", "Ask to be in the first wave."),
        ("B", "Ask what metrics decide whether the pilot expands."),
        ("C", "Prefer to be in the later wave, thanks."),
        ("D", "Ask who audits what the pilot team does with it."),
        ("E", "Predict the expansion never actually happens."),
        ("F", "Push for everyone to get access at the same time."),
        ("G", "Ask how the teams left waiting will be supported."),
      ],
      &[
        ("A", "innovator"),
        ("B", "analyst"),
        ("C", "traditionalist"),
        ("D", "guardian"),
        ("E", "skeptic"),
        ("F", "egalitarian"),
        ("G", "egalitarian"),
      ],
    ),
    question(
      4,
      "Leadership says AI will require 'reskilling.' You:",
      &[
        ("A", "Sign up for training the same afternoon."),
        ("B", "Ask for a timeline, budget, and success measures."),
        ("C", "Worry you'll be the one left behind."),
        ("D", "Insist the training is voluntary and fairly offered."),
        ("E", "Treat it as a phase that will pass."),
        ("F", "Propose new AI-strategy roles — and volunteer for one."),
        ("G", "Offer to mentor the people most at risk."),
      ],
      &[
        ("A", "innovator"),
        ("B", "strategist"),
        ("C", "worrier"),
        ("D", "guardian"),
        ("E", "skeptic"),
        ("F", "opportunist"),
        ("G", "humanitarian"),
      ],
    ),
    question(
      5,
      "What's your biggest open question about AI at work?",
      &[
        ("A", "What can I build with it this week?"),
        ("B", "How do we measure whether it actually works?"),
        ("C", "Will it replace my role?"),
        ("D", "What are the failure modes, and who gets hurt?"),
        ("E", "Is this another management fad?"),
        ("F", "How do we use it to beat our competitors?"),
        ("G", "Who gets the benefits, and who pays the costs?"),
      ],
      &[
        ("A", "innovator"),
        ("B", "analyst"),
        ("C", "worrier"),
        ("D", "guardian"),
        ("E", "skeptic"),
        ("F", "opportunist"),
        ("G", "egalitarian"),
      ],
    ),
    question(
      6,
      "You're assigned to an AI implementation team. What role do you drift into?",
      &[
        ("A", "Hands-on tester breaking things early."),
        ("B", "Roadmap owner tying the work to goals."),
        ("C", "Results tracker keeping the numbers honest."),
        ("D", "Policy checker flagging concerns."),
        ("E", "Reluctant participant doing the minimum."),
        ("F", "Idea generator pushing for more scope."),
        ("G", "Team advocate focused on who's included."),
      ],
      &[
        ("A", "innovator"),
        ("B", "strategist"),
        ("C", "analyst"),
        ("D", "guardian"),
        ("E", "traditionalist"),
        ("F", "opportunist"),
        ("G", "humanitarian"),
      ],
    ),
    question(
      7,
      "\"AI will change what jobs look like.\" Your honest take?",
      &[
        ("A", "A chance to move into new kinds of work."),
        ("B", "Fine, if it clearly serves the plan we committed to."),
        ("C", "Unsettling — nobody can tell me what my job looks like after."),
        ("D", "Acceptable only with tight controls and monitoring."),
        ("E", "Overstated, like every previous wave."),
        ("F", "An opening to reinvent the whole organization."),
        ("G", "Fine only if everyone is supported through the change."),
      ],
      &[
        ("A", "innovator"),
        ("B", "strategist"),
        ("C", "worrier"),
        ("D", "guardian"),
        ("E", "skeptic"),
        ("F", "opportunist"),
        ("G", "humanitarian"),
      ],
    ),
    question(
      8,
      "A new AI usage policy lands in your inbox. You:",
      &[
        ("A", "Read it looking for what it newly allows."),
        ("B", "Study the details and ask for clarification."),
        ("C", "Wait and see how it affects your routine."),
        ("D", "Check the privacy and bias safeguards first."),
        ("E", "Expect it to be quietly forgotten by spring."),
        ("F", "Argue for a faster, broader rollout."),
        ("G", "Survey teammates about their comfort level."),
      ],
      &[
        ("A", "innovator"),
        ("B", "analyst"),
        ("C", "traditionalist"),
        ("D", "guardian"),
        ("E", "skeptic"),
        ("F", "opportunist"),
        ("G", "humanitarian"),
      ],
    ),
    question(
      9,
      "Your team faces a tight deadline. How do you work?",
      &[
        ("A", "Use every tool available, AI included."),
        ("B", "Change the workflow only where it demonstrably saves time."),
        ("C", "Stick with what you know works under pressure."),
        ("D", "Use only tools that have been vetted, even now."),
        ("E", "A deadline is the worst possible time to experiment."),
        ("F", "Split the work — humans on judgment, AI on volume."),
        ("G", "Make sure nobody gets buried or left out in the crunch."),
      ],
      &[
        ("A", "innovator"),
        ("B", "pragmatist"),
        ("C", "traditionalist"),
        ("D", "guardian"),
        ("E", "skeptic"),
        ("F", "opportunist"),
        ("G", "humanitarian"),
      ],
    ),
    question(
      10,
      "What's your ideal working relationship with AI?",
      &[
        ("A", "Collaborator — side by side, learning and building."),
        ("B", "Consultant — advice in, humans decide."),
        ("C", "Support — available when needed, never front and center."),
        ("D", "Watchdog — monitored, questioned, kept in check."),
        ("E", "Minimal — keep it away from the core of the work."),
        ("F", "Accelerator — push the boundary and redefine the work."),
        ("G", "Equalizer — level the playing field for everyone."),
      ],
      &[
        ("A", "innovator"),
        ("B", "pragmatist"),
        ("C", "traditionalist"),
        ("D", "guardian"),
        ("E", "skeptic"),
        ("F", "opportunist"),
        ("G", "egalitarian"),
      ],
    ),
    // Role/demographic question: classification only, never scored.
    Question {
      id: 11,
      prompt: "Last one — which best describes your role?".to_string(),
      answers: pairs(&[
        ("A", "Executive / senior leadership"),
        ("B", "People manager"),
        ("C", "Individual contributor"),
        ("D", "Engineering / technical specialist"),
        ("E", "Operations / support"),
        ("F", "Consultant / external advisor"),
        ("G", "Student, or between roles"),
      ]),
      scoring: BTreeMap::new(),
      role: true,
    },
  ];

  let role_map = pairs(&[
    ("A", "executive"),
    ("B", "manager"),
    ("C", "individual_contributor"),
    ("D", "technical"),
    ("E", "operations"),
    ("F", "consultant"),
    ("G", "other"),
  ]);

  QuizCatalog {
    questions,
    archetypes,
    default_archetype: "pragmatist".to_string(),
    role_map,
  }
}
