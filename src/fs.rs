// Light filesystem abstractions
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of astgen.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Opening grammar files.
//!
//! Grammars are read through [`File`] so that the type of the underlying
//!   handle (and any buffering) is chosen by the caller,
//!     and so that tests can substitute files that never touch the disk.
//! [`PathFile`] keeps the path a grammar was opened from,
//!   since diagnostics re-read the grammar by that path after it has been
//!   parsed.

use std::fs;
use std::io::{BufRead, BufReader, Read, Result};
use std::path::{Path, PathBuf};

/// Something that can be opened by path and read from.
pub trait File: Read
where
    Self: Sized,
{
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl File for fs::File {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path)
    }
}

impl<F: File> File for BufReader<F> {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        F::open(path).map(BufReader::new)
    }
}

/// A [`File`] paired with the path it was opened from.
///
/// Reads are forwarded to the inner file.
/// Read through `&mut PathFile` to retain the path once reading is
///   complete.
#[derive(Debug, PartialEq)]
pub struct PathFile<F: File> {
    path: PathBuf,
    file: F,
}

impl<F: File> PathFile<F> {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<F: File> File for PathFile<F> {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        F::open(&path).map(|file| Self { path, file })
    }
}

impl<F: File> Read for PathFile<F> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.file.read(buf)
    }
}

impl<F: File + BufRead> BufRead for PathFile<F> {
    fn fill_buf(&mut self) -> Result<&[u8]> {
        self.file.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.file.consume(amt)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    /// Remembers the path it was opened with and reads nothing.
    #[derive(Debug, PartialEq)]
    struct NullFile(PathBuf);

    impl File for NullFile {
        fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            Ok(Self(path.as_ref().to_path_buf()))
        }
    }

    impl Read for NullFile {
        fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
            Ok(0)
        }
    }

    #[test]
    fn buf_reader_opens_inner_file() {
        let sut: BufReader<NullFile> = File::open("expr.grammar").unwrap();

        assert_eq!(NullFile("expr.grammar".into()), sut.into_inner());
    }

    #[test]
    fn path_file_keeps_path() {
        let sut: PathFile<NullFile> = File::open("stmt.grammar").unwrap();

        assert_eq!(Path::new("stmt.grammar"), sut.path());
    }

    /// Serves a two-line grammar from memory.
    #[derive(Debug, PartialEq)]
    struct MemGrammar(Cursor<&'static [u8]>);

    impl File for MemGrammar {
        fn open<P: AsRef<Path>>(_path: P) -> Result<Self> {
            Ok(Self(Cursor::new(&b"Nil\nVariable : name: Token\n"[..])))
        }
    }

    impl Read for MemGrammar {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
            self.0.read(buf)
        }
    }

    impl BufRead for MemGrammar {
        fn fill_buf(&mut self) -> Result<&[u8]> {
            self.0.fill_buf()
        }

        fn consume(&mut self, amt: usize) {
            self.0.consume(amt)
        }
    }

    #[test]
    fn path_retained_after_reading_through_reference() {
        let mut sut: PathFile<MemGrammar> = File::open("mem.grammar").unwrap();

        let lines = (&mut sut).lines().collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(vec!["Nil", "Variable : name: Token"], lines);
        assert_eq!(Path::new("mem.grammar"), sut.path());
    }
}
