//! Intent application and notification fan-out
//!
//! The glue between parsed wire messages and the world. Intents are applied
//! as they arrive, independent of tick boundaries; an intent may therefore
//! take effect mid-interval or become visible only on the next tick. Invalid
//! intents leave prior state untouched and produce no reply (the caller
//! retries at the transport layer).

use std::collections::HashMap;

use log::{debug, info};

use crate::protocol::{ClientMessage, ServerMessage};
use crate::sim::{DeathEvent, World};
use crate::wrap_angle;

/// Names longer than this (after trimming) are rejected
pub const MAX_NAME_LEN: usize = 16;

/// Apply one client intent. Only a valid join produces a reply (its ack);
/// everything else mutates the player's snake silently or is dropped.
pub fn apply_client_message(
    world: &mut World,
    player_id: u32,
    msg: &ClientMessage,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::Join { name } => {
            let trimmed = name.trim();
            if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LEN {
                debug!("player {player_id} join rejected: bad name");
                return None;
            }
            if !world.players.contains_key(&player_id) {
                return None;
            }
            let snake_id = world.spawn_snake(player_id, trimmed);
            let eliminations = world.players[&player_id].eliminations;
            info!("player {player_id} joined as {trimmed:?}, snake {snake_id}");
            Some(ServerMessage::JoinAck {
                player_id,
                snake_id,
                eliminations,
            })
        }
        ClientMessage::Move { angle } => {
            if let Some(snake) = player_snake_mut(world, player_id) {
                snake.target_direction = wrap_angle(*angle);
            }
            None
        }
        ClientMessage::Boost { active } => {
            if let Some(snake) = player_snake_mut(world, player_id) {
                snake.is_boosting = *active;
            }
            None
        }
    }
}

fn player_snake_mut(world: &mut World, player_id: u32) -> Option<&mut crate::sim::Snake> {
    let snake_id = world.players.get(&player_id)?.snake_id?;
    world.snakes.get_mut(&snake_id)
}

/// Turn a tick's death events into per-player messages: kill credit and a
/// `Stats` update for each killer, a `Dead` notice for each victim's owner.
/// Killers are resolved through the live world first and then through the
/// same death batch, so mutual head-to-head kills still credit both sides.
pub fn death_notifications(
    world: &mut World,
    deaths: &[DeathEvent],
) -> Vec<(u32, ServerMessage)> {
    let owners_of_dead: HashMap<u32, u32> = deaths
        .iter()
        .map(|event| (event.snake_id, event.owner_id))
        .collect();

    let mut out = Vec::new();
    for event in deaths {
        let mut killer_name = None;

        if let Some(killer_snake_id) = event.killer_id {
            let killer_player_id = world
                .find_player_by_snake_id(killer_snake_id)
                .map(|player| player.id)
                .or_else(|| owners_of_dead.get(&killer_snake_id).copied());

            if let Some(killer_player_id) = killer_player_id {
                if let Some(killer) = world.players.get_mut(&killer_player_id) {
                    killer.eliminations += 1;
                    out.push((
                        killer_player_id,
                        ServerMessage::Stats {
                            eliminations: killer.eliminations,
                        },
                    ));
                    let trimmed = killer.name.trim();
                    if !trimmed.is_empty() {
                        killer_name = Some(trimmed.to_string());
                    }
                }
            }
        }

        out.push((
            event.owner_id,
            ServerMessage::Dead {
                killer_id: event.killer_id,
                killer_name,
            },
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::{check_snake_collisions, kill_snake, tick};
    use glam::Vec2;
    use std::f32::consts::PI;

    fn world_with_player() -> (World, u32) {
        let mut world = World::new(SimConfig::default(), 13);
        let player_id = world.add_player();
        (world, player_id)
    }

    #[test]
    fn test_join_creates_snake_and_acks() {
        let (mut world, player_id) = world_with_player();
        let reply = apply_client_message(
            &mut world,
            player_id,
            &ClientMessage::Join {
                name: "  alpha  ".into(),
            },
        );
        let Some(ServerMessage::JoinAck {
            player_id: pid,
            snake_id,
            eliminations,
        }) = reply
        else {
            panic!("expected join ack");
        };
        assert_eq!(pid, player_id);
        assert_eq!(eliminations, 0);
        assert_eq!(world.snakes[&snake_id].name, "alpha");
        assert_eq!(world.players[&player_id].snake_id, Some(snake_id));
    }

    #[test]
    fn test_join_rejects_bad_names() {
        let (mut world, player_id) = world_with_player();
        for name in ["", "   ", "a-name-way-too-long-for-us"] {
            let reply = apply_client_message(
                &mut world,
                player_id,
                &ClientMessage::Join { name: name.into() },
            );
            assert!(reply.is_none());
            assert!(world.snakes.is_empty());
        }
    }

    #[test]
    fn test_rejoin_after_death_respawns() {
        let (mut world, player_id) = world_with_player();
        apply_client_message(
            &mut world,
            player_id,
            &ClientMessage::Join { name: "a".into() },
        );
        let first = world.players[&player_id].snake_id.unwrap();
        kill_snake(&mut world, first, None);
        assert_eq!(world.players[&player_id].snake_id, None);

        let reply = apply_client_message(
            &mut world,
            player_id,
            &ClientMessage::Join { name: "a".into() },
        );
        let Some(ServerMessage::JoinAck { snake_id, .. }) = reply else {
            panic!("expected join ack");
        };
        assert_ne!(snake_id, first);
        assert!(world.snakes.contains_key(&snake_id));
    }

    #[test]
    fn test_move_sets_target_direction() {
        let (mut world, player_id) = world_with_player();
        apply_client_message(
            &mut world,
            player_id,
            &ClientMessage::Join { name: "a".into() },
        );
        apply_client_message(
            &mut world,
            player_id,
            &ClientMessage::Move { angle: 3.0 * PI },
        );
        let snake_id = world.players[&player_id].snake_id.unwrap();
        // Angle arrives wrapped into [-π, π)
        assert!((world.snakes[&snake_id].target_direction.abs() - PI).abs() < 1e-4);
    }

    #[test]
    fn test_move_with_huge_angle_wraps_promptly() {
        // 1e9 is finite and passes parse validation; wrapping must reduce it
        // without iterating, not stall the server loop.
        let (mut world, player_id) = world_with_player();
        apply_client_message(
            &mut world,
            player_id,
            &ClientMessage::Join { name: "a".into() },
        );
        apply_client_message(&mut world, player_id, &ClientMessage::Move { angle: 1e9 });
        let snake_id = world.players[&player_id].snake_id.unwrap();
        let target = world.snakes[&snake_id].target_direction;
        assert!(target > -PI - 1e-4 && target <= PI + 1e-4);
    }

    #[test]
    fn test_move_without_snake_is_dropped() {
        let (mut world, player_id) = world_with_player();
        let reply =
            apply_client_message(&mut world, player_id, &ClientMessage::Move { angle: 1.0 });
        assert!(reply.is_none());
    }

    #[test]
    fn test_boost_toggle() {
        let (mut world, player_id) = world_with_player();
        apply_client_message(
            &mut world,
            player_id,
            &ClientMessage::Join { name: "a".into() },
        );
        apply_client_message(&mut world, player_id, &ClientMessage::Boost { active: true });
        let snake_id = world.players[&player_id].snake_id.unwrap();
        assert!(world.snakes[&snake_id].is_boosting);
    }

    #[test]
    fn test_body_kill_credits_killer() {
        let mut world = World::new(SimConfig::default(), 13);
        let killer_pid = world.add_player();
        let victim_pid = world.add_player();
        let killer_snake = world.spawn_snake(killer_pid, "rex");
        let victim_snake = world.spawn_snake(victim_pid, "prey");
        // Victim head resting on the killer's body
        {
            let snake = world.snakes.get_mut(&killer_snake).unwrap();
            snake.segments = vec![Vec2::new(100.0, 0.0), Vec2::new(-100.0, 0.0)];
        }
        {
            let snake = world.snakes.get_mut(&victim_snake).unwrap();
            snake.segments = vec![Vec2::new(0.0, 5.0), Vec2::new(0.0, 125.0)];
        }

        let pending = check_snake_collisions(&world);
        let mut deaths = Vec::new();
        for death in pending {
            if let Some(event) = kill_snake(&mut world, death.snake_id, death.killer_id) {
                deaths.push(event);
            }
        }
        let messages = death_notifications(&mut world, &deaths);

        assert_eq!(world.players[&killer_pid].eliminations, 1);
        let stats = messages
            .iter()
            .find(|(pid, _)| *pid == killer_pid)
            .expect("stats for killer");
        assert!(matches!(stats.1, ServerMessage::Stats { eliminations: 1 }));
        let dead = messages
            .iter()
            .find(|(pid, _)| *pid == victim_pid)
            .expect("dead notice for victim");
        match &dead.1 {
            ServerMessage::Dead {
                killer_id,
                killer_name,
            } => {
                assert_eq!(*killer_id, Some(killer_snake));
                assert_eq!(killer_name.as_deref(), Some("rex"));
            }
            other => panic!("expected dead message, got {other:?}"),
        }
    }

    #[test]
    fn test_mutual_kill_credits_both() {
        let mut world = World::new(SimConfig::default(), 13);
        let pa = world.add_player();
        let pb = world.add_player();
        let sa = world.spawn_snake(pa, "left");
        let sb = world.spawn_snake(pb, "right");
        // Facing each other head-on, ten units apart
        {
            let snake = world.snakes.get_mut(&sa).unwrap();
            snake.segments = vec![Vec2::new(-10.0, 0.0), Vec2::new(-130.0, 0.0)];
            snake.direction = 0.0;
            snake.target_direction = 0.0;
        }
        {
            let snake = world.snakes.get_mut(&sb).unwrap();
            snake.segments = vec![Vec2::new(10.0, 0.0), Vec2::new(130.0, 0.0)];
            snake.direction = PI;
            snake.target_direction = PI;
        }

        let out = tick(&mut world);
        assert_eq!(out.deaths.len(), 2);
        let messages = death_notifications(&mut world, &out.deaths);

        assert_eq!(world.players[&pa].eliminations, 1);
        assert_eq!(world.players[&pb].eliminations, 1);
        // Both victims get a dead notice naming the other snake
        let named: Vec<_> = messages
            .iter()
            .filter_map(|(_, msg)| match msg {
                ServerMessage::Dead { killer_name, .. } => killer_name.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(named.len(), 2);
        assert!(named.contains(&"left".to_string()));
        assert!(named.contains(&"right".to_string()));
    }
}
