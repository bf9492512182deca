mod helpers;
mod test_parse;
mod test_plan;
mod test_update;
