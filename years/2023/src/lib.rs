//! Solutions for Advent of Code 2023.
//!
//! Every day is a module exposing a `solve` function taking the puzzle input
//! and returning the answers to both parts, with a matching binary under
//! `src/bin`.

pub mod d01;
pub mod d02;
pub mod d03;
pub mod d04;
