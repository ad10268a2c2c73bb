use anchor_lang::prelude::*;
use anchor_lang::solana_program::{instruction::Instruction, system_instruction};

/// Hands a System Program instruction to the runtime.
pub fn invoke_system(
    ix: &Instruction,
    accounts: &[AccountInfo],
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    #[cfg(target_os = "solana")]
    anchor_lang::solana_program::program::invoke_signed(ix, accounts, signer_seeds)?;

    // Host builds go through the syscall stubs, which tests replace with an
    // in-process System Program.
    #[cfg(not(target_os = "solana"))]
    solana_sysvar::program_stubs::sol_invoke_signed(ix, accounts, signer_seeds)?;

    Ok(())
}

pub fn transfer<'info>(
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    lamports: u64,
) -> Result<()> {
    let ix = system_instruction::transfer(from.key, to.key, lamports);
    invoke_system(&ix, &[from.clone(), to.clone(), system_program.clone()], &[])
}

/// Serializes `value` into `target`, creating the account at its PDA first if
/// the program does not own it yet.
pub fn store_new<'info, T: AccountSerialize>(
    target: &AccountInfo<'info>,
    value: &T,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    let bytes = serialize(value)?;
    if target.owner != &crate::ID {
        create(target, bytes.len(), payer, system_program, signer_seeds)?;
    }
    write(target, &bytes, payer, system_program)
}

/// Serializes `value` into an account the program already owns, resizing it to
/// fit. Growth is paid for by `payer`; rent freed by shrinking goes back to it.
pub fn store<'info, T: AccountSerialize>(
    target: &AccountInfo<'info>,
    value: &T,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
) -> Result<()> {
    let bytes = serialize(value)?;
    write(target, &bytes, payer, system_program)
}

fn serialize<T: AccountSerialize>(value: &T) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    value.try_serialize(&mut bytes)?;
    Ok(bytes)
}

fn create<'info>(
    target: &AccountInfo<'info>,
    space: usize,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    let rent = Rent::get()?.minimum_balance(space);
    let balance = target.lamports();

    if balance == 0 {
        let ix = system_instruction::create_account(
            payer.key,
            target.key,
            rent,
            space as u64,
            &crate::ID,
        );
        return invoke_system(
            &ix,
            &[payer.clone(), target.clone(), system_program.clone()],
            &[signer_seeds],
        );
    }

    // create_account refuses an address that already holds lamports, so a
    // pre-funded PDA is topped up, allocated and assigned step by step.
    let top_up = rent.saturating_sub(balance);
    if top_up > 0 {
        transfer(payer, target, system_program, top_up)?;
    }
    let ix = system_instruction::allocate(target.key, space as u64);
    invoke_system(&ix, &[target.clone(), system_program.clone()], &[signer_seeds])?;
    let ix = system_instruction::assign(target.key, &crate::ID);
    invoke_system(&ix, &[target.clone(), system_program.clone()], &[signer_seeds])
}

fn write<'info>(
    target: &AccountInfo<'info>,
    bytes: &[u8],
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
) -> Result<()> {
    let current = target.data_len();
    if bytes.len() != current {
        let rent = Rent::get()?.minimum_balance(bytes.len());
        let balance = target.lamports();
        if rent > balance {
            transfer(payer, target, system_program, rent - balance)?;
        } else if bytes.len() < current {
            let surplus = balance - rent;
            target.sub_lamports(surplus)?;
            payer.add_lamports(surplus)?;
        }
        target.resize(bytes.len())?;
    }

    target.try_borrow_mut_data()?.copy_from_slice(bytes);
    Ok(())
}
