//! Obstacle spawning, motion and boundary scoring

use glam::DVec2;
use rand::Rng;

use super::state::{GameMode, Obstacle};
use crate::consts::*;

/// Obstacles entering the playfield this tick.
///
/// Arcade rolls two independent trials, so zero, one or two obstacles may
/// appear in the same tick. Classic lays out a fixed course and ignores `rng`.
pub fn spawn<R: Rng>(mode: GameMode, time_ticks: u64, rng: &mut R) -> Vec<Obstacle> {
    let mut spawned = Vec::new();
    match mode {
        GameMode::Arcade => {
            if rng.random::<f64>() < FALLING_SPAWN_CHANCE {
                let x = (rng.random::<f64>() * WIDTH).floor();
                let y = (rng.random::<f64>() * HEIGHT / 4.0).floor();
                spawned.push(Obstacle::falling(DVec2::new(x, y)));
            }
            if rng.random::<f64>() < SLIDING_SPAWN_CHANCE {
                let obstacle = if rng.random_bool(0.5) {
                    Obstacle::Sliding {
                        position: DVec2::new(1.0, GROUND_Y),
                        forwards: true,
                    }
                } else {
                    Obstacle::Sliding {
                        position: DVec2::new(WIDTH, GROUND_Y),
                        forwards: false,
                    }
                };
                spawned.push(obstacle);
            }
        }
        GameMode::Classic => {
            if time_ticks % CLASSIC_SPAWN_INTERVAL == 0 {
                spawned.push(Obstacle::Scrolling {
                    position: DVec2::new(CLASSIC_SPAWN_X, GROUND_Y),
                });
            }
        }
    }
    spawned
}

/// Move every obstacle one tick along its path
pub fn advance(obstacles: Vec<Obstacle>) -> Vec<Obstacle> {
    obstacles.into_iter().map(Obstacle::tick).collect()
}

/// Split into `(kept, cleared)`; every cleared obstacle is worth one point.
///
/// Relative order of the kept obstacles is preserved.
pub fn prune(obstacles: Vec<Obstacle>) -> (Vec<Obstacle>, Vec<Obstacle>) {
    let (cleared, kept): (Vec<_>, Vec<_>) =
        obstacles.into_iter().partition(Obstacle::is_out_of_bounds);
    (kept, cleared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_classic_spawns_on_interval() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(spawn(GameMode::Classic, 0, &mut rng).len(), 1);
        assert!(spawn(GameMode::Classic, 1, &mut rng).is_empty());
        assert!(spawn(GameMode::Classic, CLASSIC_SPAWN_INTERVAL - 1, &mut rng).is_empty());
        let spawned = spawn(GameMode::Classic, CLASSIC_SPAWN_INTERVAL, &mut rng);
        assert_eq!(
            spawned,
            vec![Obstacle::Scrolling { position: DVec2::new(CLASSIC_SPAWN_X, GROUND_Y) }]
        );
    }

    #[test]
    fn test_arcade_spawn_positions() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut falling = 0;
        let mut sliding = 0;
        for tick in 0..20_000 {
            for obstacle in spawn(GameMode::Arcade, tick, &mut rng) {
                let p = obstacle.position();
                match obstacle {
                    Obstacle::Falling { ticks, .. } => {
                        falling += 1;
                        assert_eq!(ticks, 0);
                        assert!((0.0..WIDTH).contains(&p.x));
                        assert!((0.0..HEIGHT / 4.0).contains(&p.y));
                        assert_eq!(p.x, p.x.floor());
                    }
                    Obstacle::Sliding { forwards, .. } => {
                        sliding += 1;
                        assert_eq!(p.y, GROUND_Y);
                        assert_eq!(p.x, if forwards { 1.0 } else { WIDTH });
                    }
                    Obstacle::Scrolling { .. } => panic!("arcade never spawns scrolling blocks"),
                }
            }
        }
        // Expected 500 falling and 250 sliding
        assert!((350..650).contains(&falling), "falling = {falling}");
        assert!((150..350).contains(&sliding), "sliding = {sliding}");
    }

    #[test]
    fn test_arcade_trials_are_independent() {
        let mut rng = Pcg32::seed_from_u64(7);
        let both = (0..200_000)
            .map(|tick| spawn(GameMode::Arcade, tick, &mut rng))
            .find(|spawned| spawned.len() == 2)
            .expect("falling and sliding never spawned on the same tick");
        let kinds: Vec<ObstacleKind> = both.iter().map(Obstacle::kind).collect();
        assert_eq!(kinds, vec![ObstacleKind::Falling, ObstacleKind::Sliding]);
    }

    #[test]
    fn test_scrolling_block_clears_after_81_ticks() {
        let mut obstacles = vec![Obstacle::Scrolling { position: DVec2::new(800.0, GROUND_Y) }];
        let mut score = 0;
        for tick in 1..=81 {
            let (kept, cleared) = prune(advance(obstacles));
            obstacles = kept;
            score += cleared.len();
            if tick < 81 {
                assert_eq!(score, 0, "cleared early at tick {tick}");
            }
        }
        assert_eq!(score, 1);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_prune_keeps_order_and_never_skips() {
        let gone = |x: f64| Obstacle::Sliding { position: DVec2::new(x, GROUND_Y), forwards: false };
        let obstacles = vec![
            gone(-1.0),
            gone(-2.0),
            Obstacle::falling(DVec2::new(10.0, 10.0)),
            gone(-3.0),
            Obstacle::falling(DVec2::new(20.0, 20.0)),
            Obstacle::falling(DVec2::new(30.0, HEIGHT + 1.0)),
        ];
        let (kept, cleared) = prune(obstacles);
        assert_eq!(cleared.len(), 4);
        assert_eq!(kept.iter().map(|o| o.position().x).collect::<Vec<_>>(), vec![10.0, 20.0]);
        assert_eq!(cleared.last().map(Obstacle::kind), Some(ObstacleKind::Falling));
    }
}
