// PDA seeds
pub const REGISTRY_SEED: &[u8] = b"registry";
pub const POLL_SEED: &[u8] = b"poll";
pub const PROPOSAL_SEED: &[u8] = b"proposal";

// Fee schedule in lamports (1 SOL = 1_000_000_000 lamports)
pub const PROPOSE_COST: u64 = 2_500_000; // 0.0025 SOL
pub const UPVOTE_COST: u64 = 250_000; // 0.00025 SOL
pub const DOWNVOTE_COST: u64 = 500_000; // 0.0005 SOL

// Field limits, in bytes
pub const MAX_AVATAR_URL_LEN: usize = 256;
pub const MAX_POLL_TITLE_LEN: usize = 100;
pub const MAX_ABOUT_LEN: usize = 280;
pub const MAX_PROPOSAL_TITLE_LEN: usize = 100;

// Anchor account discriminator
pub const DISCRIMINATOR_SIZE: usize = 8;
