use chrono::Utc;
use moonphase::{next_transition, read_phase};

fn main() {
    let now = Utc::now();
    let reading = read_phase(now);

    println!("{reading}");
    println!("Fraction: {:.4}", reading.fraction);
    println!("Age: {}", reading.age());
    match next_transition(now) {
        Ok(next) => println!("Next: {} at {}", next.phase, next.start),
        Err(e) => eprintln!("next phase change unavailable: {e}"),
    }
}
