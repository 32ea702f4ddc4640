//! Test support for the metadata codec.


#[cfg(test)]
mod unit;
