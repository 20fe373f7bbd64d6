mod common;

mod router;
