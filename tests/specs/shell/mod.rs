mod capture;
mod derivation;
mod endpoints;
mod environment;
mod exit_codes;
mod input;
mod streaming;
