mod support;

mod creation;
