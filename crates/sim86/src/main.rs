/*
    sim86
    Copyright 2022-2025 Daniel Balsom
    https://github.com/dbalsom/sim86

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.
*/

//! `sim86 <input-file> [exec|exec-ip]`
//!
//! Reads a headerless code image. With no mode argument, prints the decoded
//! assembly one instruction per line. `exec` decodes then simulates, printing
//! one trace line per executed instruction; `exec-ip` also logs the program
//! counter in each line.

use std::{env, fs};

use anyhow::{bail, Context, Result};
use sim86_dasm::{decode, Instruction};
use sim86_exec::Simulator;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(path) = args.first() else {
        bail!("usage: sim86 <input-file> [exec|exec-ip]");
    };

    let image = fs::read(path).with_context(|| format!("reading code image `{path}`"))?;
    let instructions = decode(&image).with_context(|| format!("decoding `{path}`"))?;

    match args.get(1).map(String::as_str) {
        None => {
            for ins in &instructions {
                println!("{}", ins.text);
            }
        }
        Some("exec") => simulate(&instructions, false)?,
        Some("exec-ip") => simulate(&instructions, true)?,
        Some(mode) => bail!("unknown mode `{mode}` (expected `exec` or `exec-ip`)"),
    }

    Ok(())
}

fn simulate(instructions: &[Instruction], trace_ip: bool) -> Result<()> {
    let mut sim = Simulator::new(trace_ip);
    for line in sim.run(instructions).context("simulation failed")? {
        println!("{line}");
    }
    Ok(())
}
