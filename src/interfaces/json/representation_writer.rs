use crate::application::presenter::Representation;
use crate::error::Result;
use std::io::Write;

/// Writes representations as JSON Lines, one object per line.
pub struct RepresentationWriter<W: Write> {
    writer: W,
}

impl<W: Write> RepresentationWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, representation: &Representation) -> Result<()> {
        serde_json::to_writer(&mut self.writer, representation)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn write_all<'a, I>(&mut self, representations: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Representation>,
    {
        for representation in representations {
            self.write(representation)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
