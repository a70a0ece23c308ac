pub mod limits {

    pub const MIN_RESULT_LIMIT: u64 = 1;

    pub const MAX_RESULT_LIMIT: u64 = 100;

    /// Largest batch accepted by the compare operations.
    pub const MAX_COMPARE_ENTITIES: usize = 10;
}

pub mod defaults {

    pub const MIN_VOTES: u64 = 1000;

    pub const WEIGHT_M: f64 = 1000.0;

    pub const EPISODE_LIMIT: u64 = 10;

    pub const PAGE_SIZE: u64 = 20;

    pub const TOP_MOVIES_MIN_VOTES: u64 = 10_000;

    pub const GENRE_LIMIT: u64 = 50;

    pub const DECADE_FLOOR: i32 = 1920;
}
