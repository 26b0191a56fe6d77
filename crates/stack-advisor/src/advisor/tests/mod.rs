mod common;
mod gain;
mod service;
