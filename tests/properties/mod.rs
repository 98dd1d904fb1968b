mod tests_consistency;
