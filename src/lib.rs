/*! # `ladle`

A library crate backing a community recipe-sharing app.

## Purpose

`ladle` owns everything behind the page: a SQLite database of submitted
recipes, their comments and star ratings, the "recipe of the day" pointer,
and the geocoding that puts each dish on a map.

The hosting UI stays dumb on purpose. Every interaction calls one of the
handlers in [`pages`] or [`submit`] with an explicit [`database::Store`]
handle and gets back a view struct (or an outcome enum) to render. There is
no global session state in here.

## Layout

- [`database`]: the `Store` handle, schema migrations, insertion queries.
- [`models`]: `Recipe`, `Comment`, and the `Spotlight` pointer.
- [`geocode`]: best-effort country-name lookup with a cache.
- [`submit`]: validation, duplicate rejection, image saving, insertion.
- [`search`]: substring filtering and listing sorts.
- [`pages`]: page assembly plus the comment and admin handlers.
*/

pub mod config;
pub mod database;
pub mod error;
pub mod geocode;
pub mod models;
pub mod pages;
pub mod search;
pub mod submit;
