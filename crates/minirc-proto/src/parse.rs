//! Inbound line parsing.

/// A parsed inbound line, borrowing from the line buffer.
///
/// Shape: `[":" prefix SP] command SP* (params)` where the parameters are
/// space-separated tokens optionally terminated by a trailing segment
/// introduced by ` :`, which extends to the end of the line and may contain
/// spaces. A leading source prefix is accepted from clients but never
/// consulted for routing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRef<'a> {
    /// Source prefix, without its leading `:`.
    pub prefix: Option<&'a str>,
    /// Command token, in the casing the client sent it.
    pub command: &'a str,
    params: Vec<&'a str>,
}

impl<'a> MessageRef<'a> {
    /// Parse one line. Returns `None` when no command token is present.
    pub fn parse(line: &'a str) -> Option<MessageRef<'a>> {
        let line = line.trim_end_matches(['\r', '\n']);

        let (head, trailing) = match line.find(" :") {
            Some(pos) => (&line[..pos], Some(&line[pos + 2..])),
            None => (line, None),
        };

        let mut tokens = head.split(' ').filter(|t| !t.is_empty());

        let first = tokens.next()?;
        let (prefix, command) = match first.strip_prefix(':') {
            Some(source) => (Some(source), tokens.next()?),
            None => (None, first),
        };

        let mut params: Vec<&str> = tokens.collect();
        if let Some(trailing) = trailing {
            params.push(trailing);
        }

        Some(MessageRef {
            prefix,
            command,
            params,
        })
    }

    /// The n-th parameter, counting the trailing segment as the last one.
    #[inline]
    pub fn arg(&self, n: usize) -> Option<&'a str> {
        self.params.get(n).copied()
    }

    /// All parameters in order.
    #[inline]
    pub fn params(&self) -> &[&'a str] {
        &self.params
    }
}
