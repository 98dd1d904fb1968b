mod tests_editing;
mod tests_loading;
mod tests_service;
