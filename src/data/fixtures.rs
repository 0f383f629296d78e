//! Small on-disk dataset shared by the unit tests.

use super::store::{load_all, DataSources, DataStore};
use std::fs;
use tempfile::TempDir;

pub const PICK_GROUPED: &str = "\
patch,Aatrox,Ahri
13.1,3,2
13.2,,4
13.3,2,1
13.4,5,
";

pub const BAN_GROUPED: &str = "\
patch,Ahri,Zed,Aatrox
13.1,1,2,0
13.2,3,,1
13.3,,1,2
13.4,2,3,1
";

pub const PICK_STATS: &str = "\
patch,patch_games,Date
13.1,10,2023-01-10
13.2,12,2023-01-25
13.3,8,2023-02-08
13.4,10,2023-02-23
";

pub const WIN_STATS: &str = "\
patch,top_5,top_20,Date
13.1,52.5,50.1,2023-01-10
13.2,53.0,49.8,2023-01-25
13.3,51.2,50.4,2023-02-08
13.4,54.1,50.0,2023-02-23
";

pub const PRESENCE_STATS: &str = "\
patch,top_5,top_20
13.1,88.0,61.0
13.2,90.5,63.2
13.3,85.0,60.0
13.4,92.0,64.4
";

pub const WIN_PCT_SORTED: &str = "\
patch,Aatrox,Ahri,Zed,Date
13.1,50.0,48.0,55.0,2023-01-10
13.2,47.5,52.0,51.0,2023-01-25
13.3,53.0,50.0,44.0,2023-02-08
13.4,49.0,56.0,,2023-02-23
";

pub const PRESENCE_PCT_SORTED: &str = "\
patch,Aatrox,Ahri,Zed,Date
13.1,49,60,50,2023-01-10
13.2,50,70,10,2023-01-25
13.3,51,20,65,2023-02-08
13.4,30,55,,2023-02-23
";

pub const BAN_PCT_SORTED: &str = "\
patch,Aatrox,Ahri,Zed,Date
13.1,0.0,10.0,20.0,2023-01-10
13.2,8.3,25.0,,2023-01-25
13.3,25.0,,12.5,2023-02-08
13.4,10.0,20.0,30.0,2023-02-23
";

pub const RELEASES: &str = "\
index,Champion,Release Patch,Release Date,patches_since_release
0,Aatrox,12.24,2022-12-14,4
1,Ahri,12.22,2022-11-15,6
2,Zed,12.20,2022-10-19,8
";

/// Writes the fixture dataset into a fresh temp directory.
pub fn write_dataset() -> TempDir {
    let dir = TempDir::new().unwrap();
    let files = [
        ("pick_grouped.csv", PICK_GROUPED),
        ("ban_grouped.csv", BAN_GROUPED),
        ("pick_stats.csv", PICK_STATS),
        ("win_stats.csv", WIN_STATS),
        ("presence_stats.csv", PRESENCE_STATS),
        ("win_pct_sorted.csv", WIN_PCT_SORTED),
        ("presence_pct_sorted.csv", PRESENCE_PCT_SORTED),
        ("ban_pct_sorted.csv", BAN_PCT_SORTED),
        ("champion_w_release.csv", RELEASES),
    ];
    for (name, body) in files {
        fs::write(dir.path().join(name), body).unwrap();
    }
    dir
}

pub fn load_store() -> DataStore {
    let dir = write_dataset();
    load_all(&DataSources::in_dir(dir.path())).unwrap()
}

/// Loads the fixture dataset with one file replaced.
pub fn load_store_with(file: &str, body: &str) -> DataStore {
    let dir = write_dataset();
    fs::write(dir.path().join(file), body).unwrap();
    load_all(&DataSources::in_dir(dir.path())).unwrap()
}
