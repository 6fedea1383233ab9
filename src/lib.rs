// Library root
// -----------
// This crate exposes the pieces of the country statistics console. The
// binary (`main.rs`) wires them together and runs the menu loop.
//
// Module responsibilities:
// - `model`: the `Country` record and its builder.
// - `dao`: the data-access trait the menu talks to, and its SQLite backend.
// - `prompt`: line-based prompting and the field validators.
// - `ui`: the numbered menu and the view/add/edit/delete actions.
// - `config`: settings read from the environment.
// - `seed`: populating an empty database from JSON.
// - `error`: error types shared by the above.
pub mod config;
pub mod dao;
pub mod error;
pub mod model;
pub mod prompt;
pub mod seed;
pub mod ui;
