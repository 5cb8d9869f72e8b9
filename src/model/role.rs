use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Admin,
    Hr,
    Employee,
}

impl FromStr for Role {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "hr" => Ok(Role::Hr),
            "employee" => Ok(Role::Employee),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_values() {
        assert_eq!("HR".parse(), Ok(Role::Hr));
        assert_eq!(" admin ".parse(), Ok(Role::Admin));
        assert_eq!("employee".parse(), Ok(Role::Employee));
        assert_eq!("root".parse::<Role>(), Err(()));
    }
}
