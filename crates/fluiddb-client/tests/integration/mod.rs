mod object;
mod user;
