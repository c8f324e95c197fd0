mod common;
mod leaderboard;
mod leads;
mod pipeline;
mod service;
