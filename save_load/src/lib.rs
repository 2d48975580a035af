//! Best-score persistence.
//!
//! One RON file under `saves/`, read once at startup and rewritten whenever
//! the best score grows. Disk trouble is logged and swallowed; the game
//! never blocks on persistence.

use {
    battle::Score,
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
    system_schedule::TurnSet,
};

const SAVE_DIR: &str = "saves";
const BEST_SCORE_FILE: &str = "best_score.ron";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
struct BestScoreRecord {
    best: u64,
}

/// Last value flushed to disk, so unchanged scores never touch the file.
#[derive(Resource, Debug, Default)]
struct PersistedBest(u64);

pub struct SaveLoadPlugin;

impl Plugin for SaveLoadPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PersistedBest>()
            .add_systems(Startup, load_best_score)
            .add_systems(Update, persist_best_score.in_set(TurnSet::Cleanup));
    }
}

fn load_best_score(mut score: ResMut<Score>, mut persisted: ResMut<PersistedBest>) {
    let path = Path::new(SAVE_DIR).join(BEST_SCORE_FILE);
    match fs::read_to_string(&path) {
        Ok(contents) => match ron::from_str::<BestScoreRecord>(&contents) {
            Ok(record) => {
                score.best = record.best;
                persisted.0 = record.best;
                info!(best = record.best, "best score loaded");
            }
            Err(e) => warn!("best score file is corrupt, starting from zero: {e}"),
        },
        Err(_) => debug!("no best score file yet"),
    }
}

fn persist_best_score(score: Res<Score>, mut persisted: ResMut<PersistedBest>) {
    if !score.is_changed() || score.best <= persisted.0 {
        return;
    }
    let dir = Path::new(SAVE_DIR);
    if let Err(e) = fs::create_dir_all(dir) {
        error!("failed to create saves directory: {e}");
        return;
    }
    let record = BestScoreRecord { best: score.best };
    match ron::to_string(&record) {
        Ok(serialized) => match fs::write(dir.join(BEST_SCORE_FILE), serialized) {
            Ok(()) => {
                persisted.0 = score.best;
                debug!(best = score.best, "best score saved");
            }
            Err(e) => error!("failed to write best score: {e}"),
        },
        Err(e) => error!("failed to serialize best score: {e}"),
    }
}
