/// Motivational lines cycled per completed repetition
const MOTIVATIONAL_MESSAGES: [&str; 20] = [
    "Keep pushing, you're strong!",
    "Strong and steady wins!",
    "Feel the burn now!",
    "One more, then another!",
    "Warrior spirit never quits!",
    "You're crushing it today!",
    "Power through, stay focused!",
    "Champions never give up!",
    "Stronger with every rep!",
    "Mind over matter always!",
    "Push your limits higher!",
    "Sweat now, shine later!",
    "Unstoppable force in motion!",
    "Every rep builds greatness!",
    "Fire burns within you!",
    "Transform pain into strength!",
    "Victory is earned daily!",
    "Relentless pursuit of excellence!",
    "Break barriers, exceed expectations!",
    "Beast mode is activated!",
];

/// Builds the motivation line for a completed rep.
///
/// The message is selected deterministically from the rep number so that
/// repeated reads for the same rep always produce the same line. Rep 0
/// wraps around to the last message.
pub fn motivation_text(rep_count: u32) -> String {
    let index = match rep_count.checked_sub(1) {
        Some(n) => n as usize % MOTIVATIONAL_MESSAGES.len(),
        None => MOTIVATIONAL_MESSAGES.len() - 1,
    };
    format!("Rep {} - {}", rep_count, MOTIVATIONAL_MESSAGES[index])
}
