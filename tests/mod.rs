mod common;
mod definition;
mod validation;
mod validator;
