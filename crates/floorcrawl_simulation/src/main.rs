//! Headless прогон Floorcrawl
//!
//! Скриптованный бот проходит несколько этажей без рендера: smoke test
//! баланса и детерминизма. `floorcrawl_simulation [seed] [levels]`

use bevy::prelude::*;
use floorcrawl_simulation::logger::{self, LogLevel};
use floorcrawl_simulation::{
    ActorState, CurrencyPickup, Harness, Hostile, LevelExit, LevelOutcome, LevelProgress, Player, Position,
    SessionState, TickInput,
};

const TICK_MS: u64 = 50;
const LEVEL_TIME_LIMIT_MS: u64 = 90_000;
/// Ближе этого бот отступает от врага
const KEEP_AWAY: f32 = 150.0;

fn main() {
    logger::init_logger();
    logger::set_log_level(LogLevel::Info);

    let mut args = std::env::args().skip(1);
    let seed = parse_arg(args.next(), "seed", 42);
    let levels: u32 = parse_arg(args.next(), "levels", 5);

    println!("Starting Floorcrawl headless run (seed: {}, levels: {})", seed, levels);

    let mut harness = Harness::new(seed);
    let mut session = SessionState::default();
    let mut now = 0;

    for level in 0..levels {
        harness.begin_level(session);
        let started = now;

        loop {
            now += TICK_MS;
            let input = bot_input(&mut harness, now);
            *harness.input_mut() = input;
            harness.tick(now);

            let progress = harness.world().resource::<LevelProgress>();
            if progress.cleared || progress.player_dead || now - started >= LEVEL_TIME_LIMIT_MS {
                break;
            }
        }

        let (next, outcome) = harness.finish_level();
        println!(
            "Level {}: {:?} after {} ms (floor {} → {}, best {}, currency {})",
            level + 1,
            outcome,
            now - started,
            session.floor_level,
            next.floor_level,
            next.best_floor,
            next.currency
        );
        if matches!(outcome, LevelOutcome::Abandoned { .. }) {
            println!("Bot got stuck, stopping run");
            break;
        }
        session = next;
    }

    println!("Run complete: best floor {}, currency {}", session.best_floor, session.currency);
}

fn parse_arg<T: std::str::FromStr + std::fmt::Display>(arg: Option<String>, name: &str, default: T) -> T {
    let Some(arg) = arg else {
        return default;
    };
    arg.parse().unwrap_or_else(|_| {
        logger::log_error(&format!("❌ Invalid {} '{}', using {}", name, arg, default));
        default
    })
}

/// Ввод бота: стрелять в ближайшего врага, держать дистанцию;
/// когда врагов нет, собрать валюту и идти к выходу
fn bot_input(harness: &mut Harness, now_ms: u64) -> TickInput {
    let mut input = TickInput {
        now_ms,
        ..Default::default()
    };

    let world = harness.world_mut();
    let Some(player) = world
        .query_filtered::<(&Position, &ActorState), With<Player>>()
        .iter(world)
        .find(|(_, state)| !state.is_dead())
        .map(|(position, _)| position.0)
    else {
        return input;
    };

    let nearest = |points: Vec<Vec2>| {
        points
            .into_iter()
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
    };

    let hostiles: Vec<Vec2> = world
        .query_filtered::<(&Position, &ActorState), With<Hostile>>()
        .iter(world)
        .filter(|(_, state)| !state.is_dead())
        .map(|(position, _)| position.0)
        .collect();

    if let Some(target) = nearest(hostiles) {
        input.aim_target = target;
        input.trigger_held = true;
        if target.distance(player) < KEEP_AWAY {
            input.movement = player - target;
        }
        return input;
    }

    let pickups: Vec<Vec2> = world
        .query_filtered::<&Position, With<CurrencyPickup>>()
        .iter(world)
        .map(|position| position.0)
        .collect();
    let exits: Vec<Vec2> = world
        .query_filtered::<&Position, With<LevelExit>>()
        .iter(world)
        .map(|position| position.0)
        .collect();

    if let Some(goal) = nearest(pickups).or_else(|| nearest(exits)) {
        input.movement = goal - player;
        input.aim_target = goal;
    }
    input
}
