mod generator;
mod snapshot;
